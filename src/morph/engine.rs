//! Delaunay-based piecewise-affine morph of two parents onto a child layout
//!
//! The child landmark layout is triangulated together with eight canvas
//! boundary points. Each child triangle is filled by sampling the matching
//! triangle of both parents and mixing them with weight `alpha`. The face
//! region is finally blended into a flat parent mix by seam smoothing.

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::geometry::raster::{PixelMask, triangle_contains};
use crate::geometry::triangulation::{Rect, Triangle, delaunay};
use crate::geometry::{LandmarkSet, Point};
use crate::io::configuration::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_ALPHA, SEAM_ITERATIONS, SEAM_RELAXATION,
};
use crate::io::error::{KinError, Parent, Result, invalid_parameter};
use crate::morph::canvas::{Canvas, resize, to_canvas, to_image, weighted_blend};
use crate::morph::seam::{SeamBlend, SeamSkipReason, SeamSolver};
use crate::morph::warp::{Crop, TriangleSource};

/// Number of canvas boundary points appended to every point set
pub const BOUNDARY_POINTS: usize = 8;

/// Output canvas and mixing settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Weight of parent A in every colour mix
    pub alpha: f64,
    /// Seam smoothing sweeps; zero disables smoothing
    pub seam_iterations: usize,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            alpha: DEFAULT_ALPHA,
            seam_iterations: SEAM_ITERATIONS,
        }
    }
}

impl MorphConfig {
    /// Check canvas size and weight
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero-sized canvas or an `alpha`
    /// outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.width, self.height),
                &"canvas dimensions must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid_parameter("alpha", &self.alpha, &"must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// How the composite was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Piecewise-affine warp over a Delaunay triangulation
    Triangulated,
    /// Triangulation was empty; plain weighted blend of the resized parents
    FallbackBlend,
}

/// Morphed reference image and how it was built
#[derive(Debug, Clone, PartialEq)]
pub struct MorphResult {
    /// Canvas-sized output
    pub image: RgbImage,
    /// Triangles used, as indices into the child point set plus boundary points
    pub triangles: Vec<Triangle>,
    /// Warp or fallback
    pub composite: Composite,
    /// Seam smoothing outcome
    pub seam: SeamBlend,
    /// Triangles dropped for empty or out-of-canvas rectangles
    pub skipped_triangles: usize,
}

/// One parent image with its landmarks in that image's pixel coordinates
#[derive(Debug, Clone, Copy)]
pub struct MorphSource<'a> {
    /// Decoded parent image
    pub image: &'a RgbImage,
    /// Morph landmarks
    pub landmarks: &'a LandmarkSet,
}

/// Eight points on the canvas edge: corners and edge midpoints
pub fn boundary_points(width: u32, height: u32) -> [Point; BOUNDARY_POINTS] {
    let (w, h) = (f64::from(width), f64::from(height));
    let (mid_x, mid_y) = (f64::from(width / 2), f64::from(height / 2));
    [
        Point::new(0.0, 0.0),
        Point::new(mid_x, 0.0),
        Point::new(w - 1.0, 0.0),
        Point::new(0.0, mid_y),
        Point::new(w - 1.0, mid_y),
        Point::new(0.0, h - 1.0),
        Point::new(mid_x, h - 1.0),
        Point::new(w - 1.0, h - 1.0),
    ]
}

fn scale_factors(image: &RgbImage, width: u32, height: u32) -> (f64, f64) {
    (
        f64::from(width) / f64::from(image.width()),
        f64::from(height) / f64::from(image.height()),
    )
}

fn check_decoded(image: &RgbImage, parent: Parent) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        Err(KinError::DecodeFailure {
            parent,
            reason: "image has no pixels".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Warps two parents onto a child landmark layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphingEngine {
    config: MorphConfig,
}

impl MorphingEngine {
    /// Create an engine with the given settings
    pub const fn new(config: MorphConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub const fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Produce the morphed reference image
    ///
    /// Child landmarks are expressed in parent A's pixel frame. Point sets of
    /// unequal length are truncated to the shortest before the boundary
    /// points are appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or either parent image is empty
    pub fn morph(
        &self,
        parent_a: MorphSource<'_>,
        parent_b: MorphSource<'_>,
        child: &LandmarkSet,
    ) -> Result<MorphResult> {
        self.config.validate()?;
        check_decoded(parent_a.image, Parent::A)?;
        check_decoded(parent_b.image, Parent::B)?;

        let MorphConfig {
            width,
            height,
            alpha,
            ..
        } = self.config;
        let alpha = alpha as f32;

        let canvas_a = to_canvas(&resize(parent_a.image, width, height));
        let canvas_b = to_canvas(&resize(parent_b.image, width, height));
        let background = weighted_blend(&canvas_a, &canvas_b, alpha);

        let (ax, ay) = scale_factors(parent_a.image, width, height);
        let (bx, by) = scale_factors(parent_b.image, width, height);
        let (max_x, max_y) = (f64::from(width) - 1.0, f64::from(height) - 1.0);

        let face_len = parent_a
            .landmarks
            .len()
            .min(parent_b.landmarks.len())
            .min(child.len());
        let boundary = boundary_points(width, height);
        let with_boundary = |set: &LandmarkSet, sx: f64, sy: f64, clamp: bool| -> Vec<Point> {
            set.iter()
                .take(face_len)
                .map(|p| {
                    let scaled = p.scaled(sx, sy);
                    if clamp { scaled.clamped(max_x, max_y) } else { scaled }
                })
                .chain(boundary)
                .collect()
        };
        let points_a = with_boundary(parent_a.landmarks, ax, ay, false);
        let points_b = with_boundary(parent_b.landmarks, bx, by, false);
        let points_child = with_boundary(child, ax, ay, true);

        let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        let triangles = delaunay(rect, &points_child);
        debug!(
            points = points_child.len(),
            triangles = triangles.len(),
            "child layout triangulated"
        );

        if triangles.is_empty() {
            warn!("triangulation produced no triangles, falling back to weighted blend");
            return Ok(MorphResult {
                image: to_image(&background),
                triangles,
                composite: Composite::FallbackBlend,
                seam: SeamBlend::Skipped(SeamSkipReason::NotTriangulated),
                skipped_triangles: 0,
            });
        }

        let (mut composite, skipped_triangles) = warp_composite(
            [
                (&canvas_a, points_a.as_slice()),
                (&canvas_b, points_b.as_slice()),
            ],
            &points_child,
            &triangles,
            &background,
            alpha,
        );

        let seam = if self.config.seam_iterations == 0 {
            SeamBlend::Skipped(SeamSkipReason::Disabled)
        } else {
            let solver = SeamSolver {
                iterations: self.config.seam_iterations,
                relaxation: SEAM_RELAXATION,
            };
            let face_points = points_child.get(..face_len).unwrap_or(&[]);
            solver.blend(&mut composite, &background, face_points)
        };

        info!(
            triangles = triangles.len(),
            skipped_triangles,
            ?seam,
            "morph complete"
        );
        Ok(MorphResult {
            image: to_image(&composite),
            triangles,
            composite: Composite::Triangulated,
            seam,
            skipped_triangles,
        })
    }
}

fn vertices(points: &[Point], [i, j, k]: Triangle) -> Option<[Point; 3]> {
    Some([*points.get(i)?, *points.get(j)?, *points.get(k)?])
}

// Pixels no triangle claims keep the flat parent mix
fn warp_composite(
    parents: [(&Canvas, &[Point]); 2],
    child_points: &[Point],
    triangles: &[Triangle],
    background: &Canvas,
    alpha: f32,
) -> (Canvas, usize) {
    let mut composite = background.clone();
    let (height, width, _) = composite.dim();
    let mut claimed = PixelMask::new(width as u32, height as u32);
    let mut skipped = 0;
    let [(canvas_a, points_a), (canvas_b, points_b)] = parents;

    for &triangle in triangles {
        let prepared = vertices(child_points, triangle).and_then(|child| {
            let target = Crop::around(&child, width, height)?;
            let parent_a = vertices(points_a, triangle)?;
            let parent_b = vertices(points_b, triangle)?;
            let source_a = TriangleSource::new(parent_a, child, width, height)?;
            let source_b = TriangleSource::new(parent_b, child, width, height)?;
            Some((child, target, source_a, source_b))
        });
        let Some((child, target, source_a, source_b)) = prepared else {
            skipped += 1;
            continue;
        };

        let (end_x, end_y) = target.end();
        for y in target.y..end_y {
            for x in target.x..end_x {
                let (px, py) = (x as u32, y as u32);
                let p = Point::new(x as f64, y as f64);
                if claimed.get(px, py) || !triangle_contains(child, p) {
                    continue;
                }
                let a = source_a.sample(canvas_a, p);
                let b = source_b.sample(canvas_b, p);
                for (c, (va, vb)) in a.into_iter().zip(b).enumerate() {
                    if let Some(out) = composite.get_mut((y, x, c)) {
                        *out = alpha.mul_add(va - vb, vb);
                    }
                }
                claimed.set(px, py, true);
            }
        }
    }

    (composite, skipped)
}
