//! Axis-aligned rectangles and per-cube-face rectangle sets.
//!
//! A [`RectCube`] maps each of the six cube faces to a normalized sub-region
//! of a shared texture atlas; the mesher projects quad UVs through it.

/// An axis-aligned rectangle with origin `(x, y)` and size `(w, h)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect<T> {
    /// Left edge.
    pub x: T,
    /// Top edge.
    pub y: T,
    /// Width.
    pub w: T,
    /// Height.
    pub h: T,
}

impl<T> Rect<T> {
    /// Creates a rectangle from origin and size.
    pub fn new(x: T, y: T, w: T, h: T) -> Self {
        Rect { x, y, w, h }
    }
}

impl Rect<f32> {
    /// The unit rectangle covering `[0, 1] x [0, 1]`.
    pub fn unit() -> Self {
        Rect::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Returns the sub-rectangle at fractional origin `(fx, fy)` with
    /// fractional size `(fw, fh)`, all clamped so the result stays inside
    /// this rectangle.
    pub fn rect(&self, fx: f32, fy: f32, fw: f32, fh: f32) -> Rect<f32> {
        let cfx = fx.clamp(0.0, 1.0);
        let cfy = fy.clamp(0.0, 1.0);
        let cfw = fw.clamp(0.0, 1.0 - cfx);
        let cfh = fh.clamp(0.0, 1.0 - cfy);
        Rect::new(
            self.x + cfx * self.w,
            self.y + cfy * self.h,
            cfw * self.w,
            cfh * self.h,
        )
    }
}

/// One rectangle per cube face, in front/back/left/right/top/bottom order.
pub type RectCube<T> = [Rect<T>; 6];

/// A rect cube whose every face covers the whole `[0, 1] x [0, 1]` range.
///
/// Used when meshing a single heightfield, where no texture atlas exists and
/// quad UVs should simply span the image.
pub fn unit_rect_cube() -> RectCube<f32> {
    [Rect::unit(); 6]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_rect_is_clamped() {
        let r = Rect::new(2.0, 4.0, 8.0, 8.0);
        let sub = r.rect(0.5, 0.5, 1.0, 1.0);
        assert_eq!(sub, Rect::new(6.0, 8.0, 4.0, 4.0));

        let over = r.rect(-1.0, 2.0, 3.0, 3.0);
        assert_eq!(over, Rect::new(2.0, 12.0, 8.0, 0.0));
    }

    #[test]
    fn unit_cube_faces_span_unit_square() {
        for face in unit_rect_cube() {
            assert_eq!(face.rect(0.0, 0.0, 1.0, 1.0), Rect::unit());
        }
    }
}
