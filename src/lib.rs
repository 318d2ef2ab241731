#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Imagevox
//!
//! A voxel-art meshing engine: cube-mapped depth images go in, watertight
//! textured triangle meshes come out.
//!
//! Each object is described by up to six depth images, one per cube face.
//! A depth image is read as a [heightfield](geom::Heightfield); six of them
//! fused together form a [cubefield](geom::Cubefield), a solid 3D occupancy
//! volume. The [greedy mesher](geom::greedy) sweeps that volume axis by axis
//! and merges coplanar voxel faces into maximal rectangles, so a flat region
//! of any size costs two triangles instead of thousands. Per-voxel collapse
//! gradients let the mesher pull quad corners inward, turning single-voxel
//! steps into ramped transitions instead of hard overhangs.
//!
//! ## Key Modules
//!
//! * `geom` - heightfield/cubefield sampling, the greedy mesher, and the
//!   mesh/vertex types handed to a GPU upload layer
//! * `img` - decoded image buffers and six-sided image cubes
//! * `platform` - the fixed-timestep simulation/render scheduler
//!
//! ## Usage
//!
//! ```no_run
//! use imagevox::geom::{image_mesher, rect};
//! use imagevox::img::ImageCube;
//!
//! let cube = ImageCube::load("objects/crate/*.png").unwrap();
//! cube.validate().unwrap();
//! let mesh = image_mesher::mesh_cube(&cube, &rect::unit_rect_cube(), 1.0);
//! println!("{} vertices", mesh.vertices.len());
//! ```
//!
//! Meshing happens once at object-load time; the resulting mesh is immutable
//! and its vertex/index buffers are plain `repr(C)` data ready for upload.
//! Frame pacing is a separate concern, handled by
//! [`platform::Scheduler`]: simulation advances in fixed steps while
//! rendering runs once per loop iteration with an interpolation alpha.

pub mod geom;
pub mod img;
pub mod platform;
