//! Pixel masks, triangle rasterization and convex hulls

use bitvec::vec::BitVec;

use crate::geometry::point::Point;
use crate::geometry::triangulation::signed_area_doubled;

// Edge tolerance so pixels exactly on shared edges belong to both triangles
const EDGE_TOLERANCE: f64 = 1e-7;

/// Binary mask over a `width x height` pixel grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: BitVec,
}

impl PixelMask {
    /// Create an all-clear mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: BitVec::repeat(false, width as usize * height as usize),
        }
    }

    /// Mask width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    const fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Whether the pixel is set; out-of-range pixels are clear
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.offset(x, y)
            .and_then(|i| self.bits.get(i).map(|b| *b))
            .unwrap_or(false)
    }

    /// Set a pixel; out-of-range writes are ignored
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if let Some(i) = self.offset(x, y) {
            self.bits.set(i, value);
        }
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether no pixel is set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Whether every pixel is set
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Union with another mask of the same size; mismatched sizes are ignored
    pub fn union_with(&mut self, other: &Self) {
        if self.width == other.width && self.height == other.height {
            self.bits |= other.bits.as_bitslice();
        }
    }
}

/// Integer bounding rectangle of a point set, OpenCV `boundingRect` style
///
/// Returns `(x, y, width, height)` covering every pixel any vertex falls in.
pub fn bounding_rect(points: &[Point]) -> (i64, i64, i64, i64) {
    let min_x = points.iter().map(|p| p.x.floor()).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y.floor()).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x.floor()).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y.floor()).fold(f64::NEG_INFINITY, f64::max);

    if !min_x.is_finite() || !min_y.is_finite() {
        return (0, 0, 0, 0);
    }

    (
        min_x as i64,
        min_y as i64,
        (max_x - min_x) as i64 + 1,
        (max_y - min_y) as i64 + 1,
    )
}

/// Closed point-in-triangle test (edges and vertices count as inside)
pub fn triangle_contains(tri: [Point; 3], p: Point) -> bool {
    let [a, b, c] = tri;
    let area = signed_area_doubled(a, b, c);
    if area.abs() < f64::EPSILON {
        return false;
    }
    let scale = area.abs();
    let w0 = signed_area_doubled(b, c, p) * area.signum() / scale;
    let w1 = signed_area_doubled(c, a, p) * area.signum() / scale;
    let w2 = signed_area_doubled(a, b, p) * area.signum() / scale;
    w0 >= -EDGE_TOLERANCE && w1 >= -EDGE_TOLERANCE && w2 >= -EDGE_TOLERANCE
}

/// Fill a triangle into `mask` at integer pixel centres
pub fn fill_triangle(mask: &mut PixelMask, tri: [Point; 3]) {
    let (x, y, w, h) = bounding_rect(&tri);
    let max_x = (x + w).min(i64::from(mask.width()));
    let max_y = (y + h).min(i64::from(mask.height()));
    for py in y.max(0)..max_y {
        for px in x.max(0)..max_x {
            if triangle_contains(tri, Point::new(px as f64, py as f64)) {
                mask.set(px as u32, py as u32, true);
            }
        }
    }
}

/// Convex hull by Andrew's monotone chain, counter-clockwise without repeats
///
/// Collinear boundary points are dropped. Fewer than three distinct
/// non-collinear points yield a hull with fewer than three vertices.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while let [.., a, b] = lower.as_slice() {
            if signed_area_doubled(*a, *b, p) <= 0.0 {
                lower.pop();
            } else {
                break;
            }
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while let [.., a, b] = upper.as_slice() {
            if signed_area_doubled(*a, *b, p) <= 0.0 {
                upper.pop();
            } else {
                break;
            }
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Fill a convex polygon into a new mask of the given size
pub fn fill_convex_polygon(width: u32, height: u32, polygon: &[Point]) -> PixelMask {
    let mut mask = PixelMask::new(width, height);
    if let [first, rest @ ..] = polygon {
        for pair in rest.windows(2) {
            if let [b, c] = pair {
                fill_triangle(&mut mask, [*first, *b, *c]);
            }
        }
    }
    mask
}
