//! Mesh data structures produced by the mesher.
//!
//! The vertex layout is the fixed interleaved format the GPU upload layer
//! expects; [`Vertex`] is `repr(C)` and [`bytemuck::Pod`], so whole buffers
//! cast to byte slices without copying.

use cgmath::{Vector2, Vector3};

/// A single mesh vertex: position, flat normal, tangent, and atlas UV.
///
/// # Memory Layout
/// - Position: `[f32; 3]` (12 bytes)
/// - Normal: `[f32; 3]` (12 bytes)
/// - Tangent: `[f32; 3]` (12 bytes)
/// - UV: `[f32; 2]` (8 bytes)
///
/// Total size: 44 bytes, no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in object space.
    pub position: [f32; 3],
    /// Flat (per-triangle) surface normal.
    pub normal: [f32; 3],
    /// Tangent derived from the triangle's UV basis.
    pub tangent: [f32; 3],
    /// Texture-atlas coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex from cgmath vectors.
    pub fn new(
        position: Vector3<f32>,
        normal: Vector3<f32>,
        tangent: Vector3<f32>,
        uv: Vector2<f32>,
    ) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tangent: tangent.into(),
            uv: uv.into(),
        }
    }
}

/// A triangle-list mesh with 32-bit indices.
///
/// Every three consecutive indices form one counter-clockwise triangle.
/// The mesher appends fresh vertices per quad and never shares them, so
/// indices grow monotonically and are always valid at insertion time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Interleaved vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle-list index data, in consecutive triples.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Creates an empty mesh with capacity reserved for roughly `hint`
    /// vertices and indices.
    pub fn with_capacity(hint: usize) -> Self {
        Mesh {
            vertices: Vec::with_capacity(hint),
            indices: Vec::with_capacity(hint),
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 44);
    }

    #[test]
    fn byte_views_match_buffer_sizes() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector2::new(0.0, 0.0),
        ));
        mesh.indices.extend_from_slice(&[0, 0, 0]);
        assert_eq!(mesh.vertex_bytes().len(), 44);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(mesh.triangle_count(), 1);
    }
}
