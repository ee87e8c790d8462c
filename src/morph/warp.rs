//! Piecewise-affine sampling of one parent canvas into child triangles
//!
//! Destination pixels are mapped back through the inverse affine transform
//! and sampled bilinearly from the source triangle's bounding rectangle.
//! Samples falling outside that rectangle reflect about its edges without
//! repeating the edge pixel (reflect-101).

use crate::geometry::Point;
use crate::geometry::affine::Affine;
use crate::geometry::raster::bounding_rect;
use crate::morph::canvas::Canvas;

/// Integer pixel rectangle clipped to a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in pixels, never zero
    pub width: usize,
    /// Height in pixels, never zero
    pub height: usize,
}

impl Crop {
    /// Bounding rectangle of `points` clipped to `width x height`
    ///
    /// Returns `None` when the rectangle is empty before or after clipping.
    pub fn around(points: &[Point], width: usize, height: usize) -> Option<Self> {
        let (x, y, w, h) = bounding_rect(points);
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(width as i64);
        let y1 = (y + h).min(height as i64);
        (x1 > x0 && y1 > y0).then(|| Self {
            x: x0 as usize,
            y: y0 as usize,
            width: (x1 - x0) as usize,
            height: (y1 - y0) as usize,
        })
    }

    /// Column and row just past the rectangle
    pub const fn end(&self) -> (usize, usize) {
        (self.x + self.width, self.y + self.height)
    }
}

/// Reflect an index into `0..len` without repeating the edge (`gfedcb|abcdefgh|gfedcba`)
pub const fn reflect_101(index: i64, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = len as i64 - 1;
    let period = 2 * last;
    let folded = index.rem_euclid(period);
    if folded > last {
        (period - folded) as usize
    } else {
        folded as usize
    }
}

/// Bilinear sample at `p` (canvas coordinates) restricted to `crop`
pub fn sample_bilinear(canvas: &Canvas, crop: &Crop, p: Point) -> [f32; 3] {
    let lx = p.x - crop.x as f64;
    let ly = p.y - crop.y as f64;
    let x0 = lx.floor();
    let y0 = ly.floor();
    let fx = (lx - x0) as f32;
    let fy = (ly - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let texel = |dx: i64, dy: i64, c: usize| -> f32 {
        let cx = crop.x + reflect_101(x0 + dx, crop.width);
        let cy = crop.y + reflect_101(y0 + dy, crop.height);
        canvas.get((cy, cx, c)).copied().unwrap_or(0.0)
    };

    [0, 1, 2].map(|c| {
        let top = fx.mul_add(texel(1, 0, c) - texel(0, 0, c), texel(0, 0, c));
        let bottom = fx.mul_add(texel(1, 1, c) - texel(0, 1, c), texel(0, 1, c));
        fy.mul_add(bottom - top, top)
    })
}

/// One parent's contribution to a child triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSource {
    child_to_parent: Affine,
    crop: Crop,
}

impl TriangleSource {
    /// Prepare sampling from `parent` triangle into `child` triangle
    ///
    /// Returns `None` when either triangle is degenerate or the parent
    /// triangle's rectangle lies entirely outside the `width x height` source.
    pub fn new(
        parent: [Point; 3],
        child: [Point; 3],
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let crop = Crop::around(&parent, width, height)?;
        let child_to_parent = Affine::from_triangles(child, parent)?;
        // A flat parent triangle makes the map singular
        child_to_parent.inverse().map(|_| Self {
            child_to_parent,
            crop,
        })
    }

    /// Colour this source contributes at a child pixel
    pub fn sample(&self, canvas: &Canvas, child_pixel: Point) -> [f32; 3] {
        sample_bilinear(canvas, &self.crop, self.child_to_parent.apply(child_pixel))
    }

    /// Source rectangle the samples are drawn from
    pub const fn crop(&self) -> &Crop {
        &self.crop
    }
}
