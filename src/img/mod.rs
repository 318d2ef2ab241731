//! Decoded image buffers and six-sided image cubes.

pub mod image;
pub mod image_cube;

pub use self::image::Image;
pub use image_cube::{ImageCube, Side};

use std::path::PathBuf;

/// Errors raised while loading or validating image data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A side image failed to open or decode.
    #[error("failed to load image {path:?}")]
    Load {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: ::image::ImageError,
    },

    /// No side image of a cube could be loaded at all.
    #[error("no cube side images found for pattern {pattern:?}")]
    EmptyCube {
        /// The `*`-pattern that was expanded.
        pattern: String,
    },

    /// Cube sides disagree on channel count.
    #[error("cube side channel depths differ: {channels:?}")]
    ChannelMismatch {
        /// Channel count per side, in front/back/left/right/top/bottom order.
        channels: [i32; 6],
    },
}
