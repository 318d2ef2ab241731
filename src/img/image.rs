//! A decoded 2D pixel buffer.

use std::path::Path;

use image::DynamicImage;

use super::Error;

/// A decoded image: dense 8-bit pixel data plus layout metadata.
///
/// `channels` is the per-pixel byte count (1 for grayscale, up to 4 for
/// RGBA); the heightfield sampler only ever reads channel 0. Rows are
/// contiguous with `stride = width * channels`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: i32,
    height: i32,
    channels: i32,
    data: Vec<u8>,
}

impl Image {
    /// Loads and decodes an image file.
    ///
    /// 8-bit grayscale/RGB/RGBA images keep their native channel layout;
    /// anything else (16-bit, float) is normalized to RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| Error::Load {
            path: path.to_owned(),
            source,
        })?;

        let decoded = match decoded {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => decoded,
            other => DynamicImage::ImageRgba8(other.to_rgba8()),
        };

        let width = decoded.width() as i32;
        let height = decoded.height() as i32;
        let channels = decoded.color().channel_count() as i32;

        Ok(Image {
            width,
            height,
            channels,
            data: decoded.into_bytes(),
        })
    }

    /// Wraps raw pixel data. `data` must hold exactly
    /// `width * height * channels` bytes.
    pub fn from_raw(width: i32, height: i32, channels: i32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height * channels) as usize);
        Image {
            width,
            height,
            channels,
            data,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Bytes per row.
    pub fn stride(&self) -> i32 {
        self.width * self.channels
    }

    /// The whole pixel buffer.
    pub fn bits(&self) -> &[u8] {
        &self.data
    }

    /// The pixel row at `y`.
    ///
    /// # Panics
    /// Panics if `y` is out of range.
    pub fn row(&self, y: i32) -> &[u8] {
        let stride = self.stride() as usize;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// A copy of this image mirrored along the vertical axis.
    pub fn flipped_x(&self) -> Image {
        let channels = self.channels as usize;
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            let row = self.row(y);
            for x in (0..self.width as usize).rev() {
                data.extend_from_slice(&row[x * channels..(x + 1) * channels]);
            }
        }
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_stride() {
        let img = Image::from_raw(2, 2, 2, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(img.stride(), 4);
        assert_eq!(img.row(1), &[4, 5, 6, 7]);
    }

    #[test]
    fn flip_mirrors_pixels_not_bytes() {
        let img = Image::from_raw(2, 1, 2, vec![0, 1, 2, 3]);
        assert_eq!(img.flipped_x().bits(), &[2, 3, 0, 1]);
    }
}
