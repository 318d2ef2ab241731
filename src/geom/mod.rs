//! Geometry: volume sampling, greedy meshing, and mesh data structures.

pub mod greedy;
pub mod image_mesher;
pub mod mesh;
pub mod rect;
pub mod volume;

pub use mesh::{Mesh, Vertex};
pub use rect::{Rect, RectCube};
pub use volume::{Cubefield, Field, Heightfield};
