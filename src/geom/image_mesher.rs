//! Meshing facade: depth images in, triangle meshes out.
//!
//! Thin entry points that pick the volume type and its parameters, then
//! hand off to [`mesh_greedy`](super::greedy::mesh_greedy). Both functions
//! are pure: the same image data always yields the same mesh.

use std::time::Instant;

use log::debug;

use super::greedy::mesh_greedy;
use super::mesh::Mesh;
use super::rect::{unit_rect_cube, RectCube};
use super::volume::{Cubefield, Heightfield};
use crate::img::{Image, ImageCube};

/// Meshes a single depth image as a heightfield.
///
/// The height range is capped at `min(width, height)` so the volume stays
/// roughly cubical. UVs span the full `[0, 1]` range per face; `scale`
/// multiplies grid units into object space.
pub fn mesh_image(image: &Image, scale: f32) -> Mesh {
    let time = Instant::now();
    let depth = image.width().min(image.height());
    let hfield = Heightfield::from_image(image, depth);
    let mesh = mesh_greedy(&hfield, &unit_rect_cube(), scale);
    debug!(
        "meshed image {}x{}: {} vertices, {} triangles in {:.2?}",
        image.width(),
        image.height(),
        mesh.vertices.len(),
        mesh.triangle_count(),
        time.elapsed()
    );
    mesh
}

/// Meshes a validated six-sided image cube, mapping face UVs through the
/// atlas sub-rectangles in `uv_cube`.
pub fn mesh_cube(cube: &ImageCube, uv_cube: &RectCube<f32>, scale: f32) -> Mesh {
    let time = Instant::now();
    let cfield = Cubefield::new(cube);
    let mesh = mesh_greedy(&cfield, uv_cube, scale);
    debug!(
        "meshed cube {}x{}x{}: {} vertices, {} triangles in {:.2?}",
        cube.width(),
        cube.height(),
        cube.depth(),
        mesh.vertices.len(),
        mesh.triangle_count(),
        time.elapsed()
    );
    mesh
}
