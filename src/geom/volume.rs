//! Occupancy/gradient volumes sampled from depth images.
//!
//! A [`Heightfield`] reads one depth image as a 2.5D column-height function;
//! a [`Cubefield`] intersects six of them, one per cube face, into a full 3D
//! solid. Both expose the [`Field`] interface the greedy mesher consumes.

use cgmath::Vector3;

use crate::img::{Image, ImageCube};

/// A 3D occupancy volume with per-cell collapse gradients.
///
/// `gradient` packs one 4-bit collapse code per contributing heightfield;
/// bit n of a nibble marks corner-quadrant n of the cell's visible face as
/// collapsed, i.e. the mesher should pull that quad corner inward to
/// approximate a ramp instead of a hard voxel step.
pub trait Field {
    /// Volume extents as `(width, height, depth)`.
    fn size(&self) -> Vector3<i32>;

    /// Whether the voxel at `(x, y, z)` is solid.
    fn occupied(&self, x: i32, y: i32, z: i32) -> bool;

    /// The packed collapse-gradient code for the voxel at `(x, y, z)`.
    fn gradient(&self, x: i32, y: i32, z: i32) -> u32;
}

/// A depth image interpreted as integer column heights.
///
/// Pixel intensities map to heights through `floor(depth * (p/255)^0.45)`:
/// the gamma exponent converts flat 8-bit intensity into a perceptually
/// linear height scale. Values are fixed at construction.
#[derive(Clone, Debug)]
pub struct Heightfield {
    width: i32,
    height: i32,
    depth: i32,
    values: Vec<i32>,
}

impl Heightfield {
    /// Samples channel 0 of `image` into column heights capped at `depth`.
    pub fn from_image(image: &Image, depth: i32) -> Self {
        let width = image.width();
        let height = image.height();
        let channels = image.channels() as usize;
        let mut values = vec![0; (width * height) as usize];

        for y in 0..height {
            let row = image.row(y);
            for x in 0..width {
                let p = row[x as usize * channels];
                let v = (f32::from(p) / 255.0).powf(0.45);
                values[(y * width + x) as usize] = (v * depth as f32) as i32;
            }
        }

        Heightfield {
            width,
            height,
            depth,
            values,
        }
    }

    /// Maximum representable column height.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// The column height at `(x, y)`, with both coordinates edge-clamped
    /// into range. Always defined; never reads out of bounds.
    pub fn value(&self, x: i32, y: i32) -> i32 {
        let x = x.clamp(0, self.width - 1);
        let y = y.clamp(0, self.height - 1);
        self.values[(y * self.width + x) as usize]
    }
}

impl Field for Heightfield {
    fn size(&self) -> Vector3<i32> {
        Vector3::new(self.width, self.height, self.depth)
    }

    fn occupied(&self, x: i32, y: i32, z: i32) -> bool {
        self.value(x, y) > z
    }

    fn gradient(&self, x: i32, y: i32, z: i32) -> u32 {
        let vc = self.value(x, y);
        // Cells well below the surface never collapse.
        if vc - z > 1 {
            return 0;
        }

        let v = [
            vc - self.value(x - 1, y - 1),
            vc - self.value(x, y - 1),
            vc - self.value(x + 1, y - 1),
            vc - self.value(x - 1, y),
            vc - self.value(x + 1, y),
            vc - self.value(x - 1, y + 1),
            vc - self.value(x, y + 1),
            vc - self.value(x + 1, y + 1),
        ];

        // A neighbour counts as collapsed on a small downward step only;
        // drops of depth/2 or more stay hard edges.
        let e = 0.5 * self.depth as f32;
        let collapsed = |i: usize| v[i] > 0 && (v[i] as f32) < e;

        let mut gradient = 0;
        if collapsed(0) || collapsed(1) || collapsed(3) {
            gradient |= 0x01;
        }
        if collapsed(1) || collapsed(2) || collapsed(4) {
            gradient |= 0x02;
        }
        if collapsed(3) || collapsed(5) || collapsed(6) {
            gradient |= 0x04;
        }
        if collapsed(4) || collapsed(6) || collapsed(7) {
            gradient |= 0x08;
        }
        gradient
    }
}

/// Side order remap applied when distributing cube images to heightfields:
/// left and right are swapped relative to raw image-cube storage order to
/// correct handedness.
const SIDE_ORDER: [usize; 6] = [0, 1, 3, 2, 4, 5];

/// Six heightfields fused into one solid volume.
///
/// A voxel is solid only if every face's heightfield reports it occupied at
/// that face's axis-remapped coordinates, so the six depth projections carve
/// one consistent shape. Gradients combine into a 24-bit code, one nibble
/// per face.
#[derive(Clone, Debug)]
pub struct Cubefield {
    width: i32,
    height: i32,
    depth: i32,
    hfields: [Heightfield; 6],
}

impl Cubefield {
    /// Builds the volume from a validated cube (see
    /// [`ImageCube::validate`](crate::img::ImageCube::validate)).
    pub fn new(cube: &ImageCube) -> Self {
        let width = cube.width();
        let height = cube.height();
        let depth = cube.depth();

        // Max depth seen by each face: front/back look along Z, left/right
        // along X, top/bottom along Y.
        let depths = [depth, depth, width, width, height, height];
        let hfields = std::array::from_fn(|i| {
            Heightfield::from_image(&cube.sides[SIDE_ORDER[i]], depths[SIDE_ORDER[i]])
        });

        Cubefield {
            width,
            height,
            depth,
            hfields,
        }
    }

    /// Per-face sampling coordinates for the voxel at `(x, y, z)`.
    fn coords(&self, x: i32, y: i32, z: i32) -> [[i32; 3]; 6] {
        [
            [x, y, z],
            [x, y, self.depth - z - 1],
            [z, y, x],
            [z, y, self.width - x - 1],
            [x, z, y],
            [x, z, self.height - y - 1],
        ]
    }
}

impl Field for Cubefield {
    fn size(&self) -> Vector3<i32> {
        Vector3::new(self.width, self.height, self.depth)
    }

    fn occupied(&self, x: i32, y: i32, z: i32) -> bool {
        let c = self.coords(x, y, z);
        (0..6).all(|i| self.hfields[i].occupied(c[i][0], c[i][1], c[i][2]))
    }

    fn gradient(&self, x: i32, y: i32, z: i32) -> u32 {
        let c = self.coords(x, y, z);
        let mut gradient = 0;
        for i in 0..6 {
            gradient |= self.hfields[i].gradient(c[i][0], c[i][1], c[i][2]) << (i * 4);
        }
        gradient
    }
}
