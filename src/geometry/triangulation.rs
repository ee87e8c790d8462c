//! Delaunay triangulation by incremental Bowyer-Watson insertion
//!
//! Triangles are reported as index triples into the input point slice so the
//! same triple can address corresponding points in other landmark sets.

use crate::geometry::point::Point;

/// Axis-aligned rectangle `[x, x + width) x [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Index triple into the triangulated point set
pub type Triangle = [usize; 3];

// Points closer than this are treated as the same vertex
const COINCIDENT_EPSILON: f64 = 1e-9;
// Twice the signed area below which a triangle is considered flat
const DEGENERATE_AREA: f64 = 1e-9;
// Super triangle extends this many bounding extents past the input
const SUPER_TRIANGLE_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    center: Point,
    radius_sq: f64,
}

#[derive(Debug, Clone, Copy)]
struct WorkingTriangle {
    vertices: Triangle,
    circle: Option<Circumcircle>,
}

/// Twice the signed area of triangle `abc` (positive when counter-clockwise)
pub fn signed_area_doubled(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x).mul_add(c.y - a.y, -((b.y - a.y) * (c.x - a.x)))
}

fn circumcircle(a: Point, b: Point, c: Point) -> Option<Circumcircle> {
    let d = 2.0 * signed_area_doubled(a, b, c);
    if d.abs() < f64::EPSILON {
        return None;
    }

    let a_sq = a.x.mul_add(a.x, a.y * a.y);
    let b_sq = b.x.mul_add(b.x, b.y * b.y);
    let c_sq = c.x.mul_add(c.x, c.y * c.y);

    let ux = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
    let uy = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;
    let center = Point::new(ux, uy);
    let dx = a.x - ux;
    let dy = a.y - uy;

    Some(Circumcircle {
        center,
        radius_sq: dx.mul_add(dx, dy * dy),
    })
}

fn in_circumcircle(circle: Option<Circumcircle>, p: Point) -> bool {
    // Flat working triangles only arise between super vertices and are always replaced
    circle.is_none_or(|c| {
        let dx = p.x - c.center.x;
        let dy = p.y - c.center.y;
        dx.mul_add(dx, dy * dy) < c.radius_sq
    })
}

/// Delaunay triangulation of `points` restricted to `rect`
///
/// Points outside the rectangle do not participate, coincident points are
/// inserted once (the first occurrence wins), and zero-area triangles are
/// dropped. Returns an empty list when the usable points are collinear or
/// fewer than three.
pub fn delaunay(rect: Rect, points: &[Point]) -> Vec<Triangle> {
    let mut inserted: Vec<usize> = Vec::with_capacity(points.len());
    for (index, &p) in points.iter().enumerate() {
        if !rect.contains(p) {
            continue;
        }
        let duplicate = inserted.iter().any(|&other| {
            points
                .get(other)
                .is_some_and(|q| q.distance(&p) < COINCIDENT_EPSILON)
        });
        if !duplicate {
            inserted.push(index);
        }
    }

    if inserted.len() < 3 {
        return Vec::new();
    }

    // Super triangle vertices live past the end of the input indices
    let extent = rect.width.max(rect.height).max(1.0) * SUPER_TRIANGLE_SCALE;
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;
    let super_points = [
        Point::new(cx - 2.0 * extent, cy - extent),
        Point::new(cx + 2.0 * extent, cy - extent),
        Point::new(cx, cy + 2.0 * extent),
    ];
    let base = points.len();
    let vertex = |i: usize| -> Point {
        if i >= base {
            super_points.get(i - base).copied().unwrap_or_default()
        } else {
            points.get(i).copied().unwrap_or_default()
        }
    };
    let make = |vertices: Triangle| -> WorkingTriangle {
        let [a, b, c] = vertices;
        WorkingTriangle {
            vertices,
            circle: circumcircle(vertex(a), vertex(b), vertex(c)),
        }
    };

    let mut triangles = vec![make([base, base + 1, base + 2])];

    for &index in &inserted {
        let p = vertex(index);

        let (bad, good): (Vec<WorkingTriangle>, Vec<WorkingTriangle>) = triangles
            .into_iter()
            .partition(|t| in_circumcircle(t.circle, p));
        triangles = good;

        // Boundary of the cavity: edges owned by exactly one bad triangle
        let mut edges: Vec<[usize; 2]> = Vec::with_capacity(bad.len() * 3);
        for t in &bad {
            let [a, b, c] = t.vertices;
            edges.extend([[a, b], [b, c], [c, a]]);
        }
        let boundary = edges.iter().filter(|edge| {
            edges
                .iter()
                .filter(|other| {
                    (other[0] == edge[0] && other[1] == edge[1])
                        || (other[0] == edge[1] && other[1] == edge[0])
                })
                .count()
                == 1
        });

        for edge in boundary {
            let area = signed_area_doubled(vertex(edge[0]), vertex(edge[1]), p);
            if area.abs() < DEGENERATE_AREA {
                continue;
            }
            triangles.push(make([edge[0], edge[1], index]));
        }
    }

    triangles
        .into_iter()
        .map(|t| t.vertices)
        .filter(|tri| tri.iter().all(|&i| i < base))
        .filter(|tri| tri.iter().all(|&i| rect.contains(vertex(i))))
        .filter(|&[a, b, c]| signed_area_doubled(vertex(a), vertex(b), vertex(c)).abs() >= DEGENERATE_AREA)
        .collect()
}
