//! Six depth images fused into one cube-mapped object description.

use std::path::Path;

use log::debug;

use super::{Error, Image};

/// Cube face identifiers, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// -Z face.
    Front,
    /// +Z face.
    Back,
    /// -X face.
    Left,
    /// +X face.
    Right,
    /// +Y face.
    Top,
    /// -Y face.
    Bottom,
}

impl Side {
    /// All sides in storage order.
    pub fn all() -> [Side; 6] {
        [
            Side::Front,
            Side::Back,
            Side::Left,
            Side::Right,
            Side::Top,
            Side::Bottom,
        ]
    }

    /// The side's name as used in asset file patterns.
    pub fn name(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Missing sides borrow the first available image from this priority list.
/// A box photographed from the front usually looks much like its back.
const FALLBACKS: [[usize; 5]; 6] = [
    [1, 2, 3, 4, 5], // front
    [0, 2, 3, 4, 5], // back
    [3, 0, 1, 4, 5], // left
    [2, 0, 1, 4, 5], // right
    [5, 2, 3, 0, 1], // top
    [4, 2, 3, 0, 1], // bottom
];

/// Six side images of one object, in front/back/left/right/top/bottom order.
#[derive(Clone, Debug)]
pub struct ImageCube {
    /// The side images.
    pub sides: [Image; 6],
}

impl ImageCube {
    /// Loads a cube from a path pattern where `*` stands for the side name,
    /// e.g. `objects/crate/*.png`.
    ///
    /// Sides whose file does not exist are mirrored from loaded ones via a
    /// priority-ordered fallback table; the vertical sides are X-flipped on
    /// load to match the meshing coordinate handedness. Fails if no side
    /// image exists at all, or if any existing file fails to decode.
    pub fn load(pattern: &str) -> Result<Self, Error> {
        let mut loaded: [Option<Image>; 6] = Default::default();

        for side in Side::all() {
            let filename = pattern.replace('*', side.name());
            let path = Path::new(&filename);
            if path.exists() {
                let image = Image::load(path)?;
                loaded[side as usize] = match side {
                    Side::Top | Side::Bottom => Some(image),
                    _ => Some(image.flipped_x()),
                };
            }
        }

        Self::from_partial(loaded).ok_or_else(|| Error::EmptyCube {
            pattern: pattern.to_owned(),
        })
    }

    /// Builds a cube directly from six images.
    pub fn from_sides(sides: [Image; 6]) -> Self {
        ImageCube { sides }
    }

    /// Resolves missing sides through the fallback table. `None` when no
    /// side is present.
    fn from_partial(mut loaded: [Option<Image>; 6]) -> Option<Self> {
        for i in 0..6 {
            if loaded[i].is_some() {
                continue;
            }
            if let Some(&f) = FALLBACKS[i].iter().find(|&&f| loaded[f].is_some()) {
                debug!(
                    "image cube: using {} as {}",
                    Side::all()[f].name(),
                    Side::all()[i].name()
                );
                loaded[i] = loaded[f].clone();
            }
        }
        if loaded.iter().any(Option::is_none) {
            return None;
        }
        Some(ImageCube {
            sides: loaded.map(Option::unwrap),
        })
    }

    /// Checks the precondition the cubefield relies on: every side must
    /// share one channel count.
    pub fn validate(&self) -> Result<(), Error> {
        let channels: [i32; 6] = std::array::from_fn(|i| self.sides[i].channels());
        if channels.iter().any(|&c| c != channels[0]) {
            return Err(Error::ChannelMismatch { channels });
        }
        Ok(())
    }

    /// The side image for `side`.
    pub fn side(&self, side: Side) -> &Image {
        &self.sides[side as usize]
    }

    /// Cube width: the minimum width agreed on by the faces that see the
    /// X extent.
    pub fn width(&self) -> i32 {
        let w0 = self.side(Side::Front).width().min(self.side(Side::Back).width());
        let w1 = self.side(Side::Top).width().min(self.side(Side::Bottom).width());
        w0.min(w1)
    }

    /// Cube height, by the same minimum rule.
    pub fn height(&self) -> i32 {
        let h0 = self.side(Side::Front).height().min(self.side(Side::Back).height());
        let h1 = self.side(Side::Left).height().min(self.side(Side::Right).height());
        h0.min(h1)
    }

    /// Cube depth, by the same minimum rule.
    pub fn depth(&self) -> i32 {
        let d0 = self.side(Side::Left).width().min(self.side(Side::Right).width());
        let d1 = self.side(Side::Top).height().min(self.side(Side::Bottom).height());
        d0.min(d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: i32, height: i32, value: u8) -> Image {
        Image::from_raw(width, height, 1, vec![value; (width * height) as usize])
    }

    #[test]
    fn front_only_mirrors_to_all_sides() {
        let mut loaded: [Option<Image>; 6] = Default::default();
        loaded[Side::Front as usize] = Some(gray(4, 4, 200));

        let cube = ImageCube::from_partial(loaded).unwrap();
        assert!(cube.validate().is_ok());
        for side in Side::all() {
            assert_eq!(cube.side(side), cube.side(Side::Front));
        }
    }

    #[test]
    fn empty_cube_is_rejected() {
        assert!(ImageCube::from_partial(Default::default()).is_none());
    }

    #[test]
    fn channel_mismatch_fails_validation() {
        let mut sides: [Image; 6] = std::array::from_fn(|_| gray(2, 2, 255));
        sides[3] = Image::from_raw(2, 2, 3, vec![255; 12]);
        let cube = ImageCube::from_sides(sides);
        assert!(matches!(
            cube.validate(),
            Err(Error::ChannelMismatch { .. })
        ));
    }

    #[test]
    fn extent_is_minimum_over_side_pairs() {
        let sides = [
            gray(8, 6, 0), // front:  w->width, h->height
            gray(8, 6, 0), // back
            gray(5, 6, 0), // left:   w->depth, h->height
            gray(5, 6, 0), // right
            gray(8, 5, 0), // top:    w->width, h->depth
            gray(8, 5, 0), // bottom
        ];
        let cube = ImageCube::from_sides(sides);
        assert_eq!((cube.width(), cube.height(), cube.depth()), (8, 6, 5));
    }
}
