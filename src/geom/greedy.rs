//! Run-length greedy surface extraction over occupancy volumes.
//!
//! The mesher sweeps each of the three axes slice by slice, builds a 2D
//! boundary mask per slice, and grows maximal axis-aligned rectangles over
//! cells whose mask entries match, so large coplanar regions triangulate as
//! single quads. Cells that are solid on both sides of a slice but differ
//! in collapse gradient still produce a face: those internal seams are what
//! render sloped transitions between a collapsed voxel and its neighbours.
//!
//! Rectangle growth is the classic two-phase scan (extend width along the
//! row, then extend height while every covered cell still matches). With a
//! fixed raster order this yields maximal rectangles per starting cell, not
//! a globally minimal quad count.

use cgmath::{InnerSpace, Vector2, Vector3};

use super::mesh::{Mesh, Vertex};
use super::rect::{Rect, RectCube};
use super::volume::Field;

/// One precomputed voxel: occupancy (0/1) and collapse gradient.
#[derive(Clone, Copy, Default)]
struct Cell {
    v: i32,
    g: u32,
}

/// A slice-mask entry. `d` is the boundary class: +1/-1 for solid/empty
/// crossings by direction, a gradient delta for solid/solid seams, 0 for no
/// face. Two cells merge into one rectangle only when all three fields
/// match.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
struct MaskCell {
    d: i32,
    g0: u32,
    g1: u32,
}

/// Decodes a combined gradient into the eight corner variants of a quad's
/// bounding cell, as 0/1 offsets per axis.
///
/// The bit-test table maps gradient nibbles to the corner pulls that
/// produce ramped transitions. It is matched to the vertex winding in
/// `FACE_CORNERS`; do not rearrange either table without the other.
fn collapse_constants(g: u32) -> [[i32; 3]; 8] {
    let d = |c: u32, s: u32| -> i32 { i32::from(g & (c << s) != 0) };
    [
        // Front
        [d(0x02, 12), d(0x04, 20), 1 - d(0x01, 0)],
        [1 - d(0x02, 8), d(0x08, 20), 1 - d(0x02, 0)],
        [1 - d(0x08, 8), 1 - d(0x08, 16), 1 - d(0x08, 0)],
        [d(0x08, 12), 1 - d(0x04, 16), 1 - d(0x04, 0)],
        // Back
        [d(0x01, 12), d(0x01, 20), d(0x01, 4)],
        [1 - d(0x01, 8), d(0x02, 20), d(0x02, 4)],
        [1 - d(0x04, 8), 1 - d(0x02, 16), d(0x08, 4)],
        [d(0x04, 12), 1 - d(0x01, 16), d(0x04, 4)],
    ]
}

/// Tangent for a triangle from its UV basis, orthogonalized against the
/// normal.
fn tangent(p: [Vector3<f32>; 3], uv: [Vector2<f32>; 3], n: Vector3<f32>) -> Vector3<f32> {
    let e0 = p[1] - p[0];
    let e1 = p[2] - p[0];
    let duv0 = uv[1] - uv[0];
    let duv1 = uv[2] - uv[0];
    let f = 1.0 / (duv0.x * duv1.y - duv0.y * duv1.x);
    let t = (e0 * duv1.y - e1 * duv0.y) * f;
    (-t - n * n.dot(t)).normalize()
}

/// Appends one triangle with a flat normal and UV tangent. Degenerate
/// triangles (coincident or zero-length edge vectors, as produced by fully
/// collapsed quad corners) are dropped silently.
fn emit_tri(mesh: &mut Mesh, p: [Vector3<f32>; 3], uv: [Vector2<f32>; 3]) {
    let p01 = p[1] - p[0];
    let p02 = p[2] - p[0];
    if p01 != p02 && p01.magnitude2() > 0.0 && p02.magnitude2() > 0.0 {
        let n = p01.cross(p02).normalize();
        let t = tangent(p, uv, n);
        let ib = mesh.vertices.len() as u32;

        mesh.vertices.extend_from_slice(&[
            Vertex::new(p[0], n, t, uv[0]),
            Vertex::new(p[1], n, t, uv[1]),
            Vertex::new(p[2], n, t, uv[2]),
        ]);
        mesh.indices.extend_from_slice(&[ib, ib + 1, ib + 2]);
    }
}

/// The two in-plane axes used to project a face's position/size into UV
/// space, per face axis (-X, +X, -Y, +Y, -Z, +Z as 2d+direction).
const AXIS_UV: [[usize; 2]; 6] = [[2, 1], [2, 1], [0, 2], [0, 2], [0, 1], [0, 1]];

/// Which atlas sub-rectangle of the rect cube a face axis samples.
const AXIS_SIDE: [usize; 6] = [2, 3, 5, 4, 1, 0];

/// Emits a quad as two triangles, split along its shorter diagonal to keep
/// triangle aspect distortion down.
fn emit_quad(
    mesh: &mut Mesh,
    axis: usize,
    p: Vector3<f32>,
    s: Vector3<f32>,
    d: Vector3<f32>,
    v: [Vector3<f32>; 4],
    uv_cube: &RectCube<f32>,
) {
    let uvn = Rect::new(
        p[AXIS_UV[axis][0]] / d[AXIS_UV[axis][0]],
        p[AXIS_UV[axis][1]] / d[AXIS_UV[axis][1]],
        s[AXIS_UV[axis][0]] / d[AXIS_UV[axis][0]],
        s[AXIS_UV[axis][1]] / d[AXIS_UV[axis][1]],
    );
    let uvr = uv_cube[AXIS_SIDE[axis]].rect(uvn.x, uvn.y, uvn.w, uvn.h);

    let uva = Vector2::new(uvr.x, uvr.y);
    let uvb = Vector2::new(uvr.x + uvr.w, uvr.y);
    let uvc = Vector2::new(uvr.x + uvr.w, uvr.y + uvr.h);
    let uvd = Vector2::new(uvr.x, uvr.y + uvr.h);

    let uv: [[Vector2<f32>; 4]; 6] = [
        [uvc, uvd, uva, uvb],
        [uvd, uvc, uvb, uva],
        [uva, uvb, uvc, uvd],
        [uva, uvd, uvc, uvb],
        [uvd, uvc, uvb, uva],
        [uva, uvb, uvc, uvd],
    ];

    if (v[0] - v[2]).magnitude2() < (v[1] - v[3]).magnitude2() {
        emit_tri(mesh, [v[0], v[1], v[2]], [uv[axis][0], uv[axis][1], uv[axis][2]]);
        emit_tri(mesh, [v[2], v[3], v[0]], [uv[axis][2], uv[axis][3], uv[axis][0]]);
    } else {
        emit_tri(mesh, [v[1], v[2], v[3]], [uv[axis][1], uv[axis][2], uv[axis][3]]);
        emit_tri(mesh, [v[3], v[0], v[1]], [uv[axis][3], uv[axis][0], uv[axis][1]]);
    }
}

/// Per face axis, the four corner-variant indices (into the collapse
/// constant table) in emission winding order. Paired with
/// `collapse_constants`; see the note there.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [3, 7, 4, 0],
    [6, 2, 1, 5],
    [4, 5, 1, 0],
    [7, 3, 2, 6],
    [7, 6, 5, 4],
    [0, 1, 2, 3],
];

/// Emits one box face of the merged rectangle at grid position `pos` with
/// extent `size`, corner-collapsed per `cc` and scaled into object space.
#[allow(clippy::too_many_arguments)]
fn emit_box_face(
    mesh: &mut Mesh,
    scale: f32,
    axis: usize,
    cc: &[[i32; 3]; 8],
    pos: Vector3<i32>,
    size: Vector3<i32>,
    dims: Vector3<f32>,
    uv_cube: &RectCube<f32>,
) {
    let corner = |k: usize| -> Vector3<f32> {
        let c = cc[FACE_CORNERS[axis][k]];
        scale
            * Vector3::new(
                (pos.x + c[0] * size.x) as f32,
                (pos.y + c[1] * size.y) as f32,
                (pos.z + c[2] * size.z) as f32,
            )
    };

    let p = Vector3::new(pos.x as f32, pos.y as f32, pos.z as f32);
    let s = Vector3::new(size.x as f32, size.y as f32, size.z as f32);
    let v = [corner(0), corner(1), corner(2), corner(3)];

    emit_quad(mesh, axis, p, s, dims, v, uv_cube);
}

/// Meshes `vol` into a triangle list, mapping face UVs through `uv_cube`
/// and scaling grid units by `scale`.
///
/// Runs in O(width * height * depth) per sweep axis, dominated by mask
/// construction; rectangle growth amortizes to one visit per slice cell
/// because consumed mask entries are zeroed. The volume is read-only, the
/// output owned; the same input always produces a bit-identical mesh.
pub fn mesh_greedy<F: Field>(vol: &F, uv_cube: &RectCube<f32>, scale: f32) -> Mesh {
    let size = vol.size();
    let dims = [size.x, size.y, size.z];
    let (w, h, dp) = (size.x, size.y, size.z);

    let cell_index = |x: i32, y: i32, z: i32| -> usize { ((z * h + y) * w + x) as usize };
    let inside = |c: [i32; 3]| -> bool {
        c[0] >= 0 && c[1] >= 0 && c[2] >= 0 && c[0] < dims[0] && c[1] < dims[1] && c[2] < dims[2]
    };

    let mut cells = vec![Cell::default(); (w * h * dp).max(0) as usize];
    for z in 0..dp {
        for y in 0..h {
            for x in 0..w {
                let v = vol.occupied(x, y, z);
                cells[cell_index(x, y, z)] = Cell {
                    v: i32::from(v),
                    g: if v { vol.gradient(x, y, z) } else { 0 },
                };
            }
        }
    }

    let reserve = ((w / 4) * (h / 4) * (dp / 4)).max(0) as usize;
    let mut mesh = Mesh::with_capacity(reserve);
    let dims_f = Vector3::new(w as f32, h as f32, dp as f32);

    for d in 0..3 {
        let u = (d + 1) % 3;
        let va = (d + 2) % 3;
        let du = dims[u];
        let dv = dims[va];

        let mut x = [0i32; 3];
        let mut q = [0i32; 3];
        q[d] = 1;

        let mut mask = vec![MaskCell::default(); (du * dv).max(0) as usize];

        // The -1 slice captures boundaries on the volume's negative face.
        x[d] = -1;
        while x[d] < dims[d] {
            // Determine mask
            let mut n = 0;
            x[va] = 0;
            while x[va] < dv {
                x[u] = 0;
                while x[u] < du {
                    let c0 = [x[0], x[1], x[2]];
                    let c1 = [x[0] + q[0], x[1] + q[1], x[2] + q[2]];
                    let v0 = if inside(c0) {
                        cells[cell_index(c0[0], c0[1], c0[2])].v
                    } else {
                        0
                    };
                    let v1 = if inside(c1) {
                        cells[cell_index(c1[0], c1[1], c1[2])].v
                    } else {
                        0
                    };
                    let g0 = if v0 > 0 {
                        cells[cell_index(c0[0], c0[1], c0[2])].g
                    } else {
                        0
                    };
                    let g1 = if v1 > 0 {
                        cells[cell_index(c1[0], c1[1], c1[2])].g
                    } else {
                        0
                    };
                    // Two solid cells with differing collapse shapes still
                    // form a visible seam.
                    let dd = if v0 > 0 && v1 > 0 && g0 != g1 {
                        g1 as i32 - g0 as i32
                    } else {
                        v0 - v1
                    };
                    mask[n] = MaskCell { d: dd, g0, g1 };
                    n += 1;
                    x[u] += 1;
                }
                x[va] += 1;
            }

            x[d] += 1;
            let mut n = 0;

            for j in 0..dv {
                let mut i = 0;
                while i < du {
                    let m = mask[n];
                    if m.d != 0 {
                        // Compute width
                        let mut qw = 1;
                        while i + qw < du && mask[n + qw as usize] == m {
                            qw += 1;
                        }
                        // Compute height
                        let mut qh = 1;
                        'grow: while j + qh < dv {
                            for k in 0..qw {
                                if mask[n + k as usize + (qh * du) as usize] != m {
                                    break 'grow;
                                }
                            }
                            qh += 1;
                        }

                        x[u] = i;
                        x[va] = j;

                        let cc = collapse_constants(if m.d > 0 { m.g0 } else { m.g1 });

                        let mut pos = Vector3::new(x[0], x[1], x[2]);
                        if m.d > 0 {
                            pos[d] -= 1;
                        }

                        let mut quad_size = Vector3::new(1, 1, 1);
                        quad_size[u] = qw;
                        quad_size[va] = qh;

                        // Face axis and direction, 0..6
                        let axis = d * 2 + usize::from(m.d > 0);

                        emit_box_face(
                            &mut mesh, scale, axis, &cc, pos, quad_size, dims_f, uv_cube,
                        );

                        // Clear consumed mask cells
                        for l in 0..qh {
                            for k in 0..qw {
                                mask[n + k as usize + (l * du) as usize] = MaskCell::default();
                            }
                        }

                        i += qw;
                        n += qw as usize;
                    } else {
                        i += 1;
                        n += 1;
                    }
                }
            }
        }
    }
    mesh
}
