//! Affine maps between triangles

use crate::geometry::point::Point;

/// 2x3 affine matrix `[a b c; d e f]` mapping `(x, y)` to `(ax + by + c, dx + ey + f)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// First row
    pub row_x: [f64; 3],
    /// Second row
    pub row_y: [f64; 3],
}

impl Affine {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        row_x: [1.0, 0.0, 0.0],
        row_y: [0.0, 1.0, 0.0],
    };

    /// Unique affine map sending `src[i]` to `dst[i]` for all three vertices
    ///
    /// Returns `None` when the source triangle is degenerate.
    pub fn from_triangles(src: [Point; 3], dst: [Point; 3]) -> Option<Self> {
        let [s0, s1, s2] = src;
        let [d0, d1, d2] = dst;

        let e1 = s1 - s0;
        let e2 = s2 - s0;
        let det = e1.x.mul_add(e2.y, -(e1.y * e2.x));
        if det.abs() < f64::EPSILON {
            return None;
        }

        let f1 = d1 - d0;
        let f2 = d2 - d0;

        // Linear part M solves M * [e1 e2] = [f1 f2]
        let inv = 1.0 / det;
        let a = f1.x.mul_add(e2.y, -(f2.x * e1.y)) * inv;
        let b = f2.x.mul_add(e1.x, -(f1.x * e2.x)) * inv;
        let d = f1.y.mul_add(e2.y, -(f2.y * e1.y)) * inv;
        let e = f2.y.mul_add(e1.x, -(f1.y * e2.x)) * inv;

        let c = d0.x - a.mul_add(s0.x, b * s0.y);
        let f = d0.y - d.mul_add(s0.x, e * s0.y);

        Some(Self {
            row_x: [a, b, c],
            row_y: [d, e, f],
        })
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c] = self.row_x;
        let [d, e, f] = self.row_y;
        Point::new(a.mul_add(p.x, b.mul_add(p.y, c)), d.mul_add(p.x, e.mul_add(p.y, f)))
    }

    /// Inverse transform, `None` if the linear part is singular
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, c] = self.row_x;
        let [d, e, f] = self.row_y;
        let det = a.mul_add(e, -(b * d));
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let ia = e * inv;
        let ib = -b * inv;
        let id = -d * inv;
        let ie = a * inv;
        Some(Self {
            row_x: [ia, ib, -ia.mul_add(c, ib * f)],
            row_y: [id, ie, -id.mul_add(c, ie * f)],
        })
    }
}
