//! Gradient-domain seam smoothing (seamless clone, normal mode)
//!
//! Inside the face mask the result keeps the composite's gradients while its
//! values on the mask boundary match the background. The Poisson equation is
//! solved by successive over-relaxation starting from the composite.

use std::fmt;

use ndarray::Zip;
use tracing::debug;

use crate::geometry::Point;
use crate::geometry::raster::{PixelMask, convex_hull, fill_convex_polygon};
use crate::morph::canvas::Canvas;

/// Why seam smoothing was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeamSkipReason {
    /// The face points span fewer than three hull vertices
    DegenerateHull {
        /// Hull vertex count
        vertices: usize,
    },
    /// The hull covers no solvable interior pixel
    EmptyMask,
    /// Canvas and background shapes differ
    ShapeMismatch,
    /// No triangulated composite to smooth
    NotTriangulated,
    /// Smoothing turned off by configuration
    Disabled,
}

impl fmt::Display for SeamSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateHull { vertices } => {
                write!(f, "face hull has {vertices} vertices, need at least 3")
            }
            Self::EmptyMask => write!(f, "face mask has no interior pixels"),
            Self::ShapeMismatch => write!(f, "composite and background sizes differ"),
            Self::NotTriangulated => write!(f, "composite was not triangulated"),
            Self::Disabled => write!(f, "seam smoothing disabled"),
        }
    }
}

/// Outcome of seam smoothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeamBlend {
    /// Poisson blend applied over this many pixels
    Applied {
        /// Solved pixel count
        pixels: usize,
    },
    /// Composite returned unchanged
    Skipped(SeamSkipReason),
}

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamSolver {
    /// Relaxation sweeps over the masked region
    pub iterations: usize,
    /// Over-relaxation factor in `(0, 2)`
    pub relaxation: f32,
}

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn neighbour(y: usize, x: usize, (dy, dx): (isize, isize)) -> (usize, usize) {
    (y.wrapping_add_signed(dy), x.wrapping_add_signed(dx))
}

impl SeamSolver {
    /// Blend `composite` into `background` over the convex hull of `face_points`
    ///
    /// On success `composite` is overwritten with the blended image. Mask
    /// pixels on the canvas border stay fixed to the background.
    pub fn blend(
        &self,
        composite: &mut Canvas,
        background: &Canvas,
        face_points: &[Point],
    ) -> SeamBlend {
        if composite.dim() != background.dim() {
            return SeamBlend::Skipped(SeamSkipReason::ShapeMismatch);
        }
        let hull = convex_hull(face_points);
        if hull.len() < 3 {
            debug!(vertices = hull.len(), "seam smoothing skipped: degenerate hull");
            return SeamBlend::Skipped(SeamSkipReason::DegenerateHull {
                vertices: hull.len(),
            });
        }

        let (height, width, _) = composite.dim();
        let mask = fill_convex_polygon(width as u32, height as u32, &hull);
        let interior = interior_pixels(&mask);
        if interior.is_empty() {
            debug!("seam smoothing skipped: empty mask");
            return SeamBlend::Skipped(SeamSkipReason::EmptyMask);
        }

        // Guidance field: discrete Laplacian of the composite
        let guidance: Vec<[f32; 3]> = interior
            .iter()
            .map(|&(y, x)| {
                [0, 1, 2].map(|c| {
                    let centre = composite.get((y, x, c)).copied().unwrap_or(0.0);
                    NEIGHBOURS
                        .iter()
                        .map(|&d| {
                            let (ny, nx) = neighbour(y, x, d);
                            centre - composite.get((ny, nx, c)).copied().unwrap_or(centre)
                        })
                        .sum()
                })
            })
            .collect();

        // Outside the region the solution equals the background
        let mut solution = background.clone();
        for &(y, x) in &interior {
            for c in 0..3 {
                let value = composite.get((y, x, c)).copied();
                if let (Some(out), Some(v)) = (solution.get_mut((y, x, c)), value) {
                    *out = v;
                }
            }
        }

        for _ in 0..self.iterations {
            for (&(y, x), g) in interior.iter().zip(&guidance) {
                for (c, &lap) in g.iter().enumerate() {
                    let neighbours: f32 = NEIGHBOURS
                        .iter()
                        .map(|&d| {
                            let (ny, nx) = neighbour(y, x, d);
                            solution.get((ny, nx, c)).copied().unwrap_or(0.0)
                        })
                        .sum();
                    if let Some(value) = solution.get_mut((y, x, c)) {
                        let target = (neighbours + lap) / 4.0;
                        *value = self.relaxation.mul_add(target - *value, *value);
                    }
                }
            }
        }

        Zip::from(&mut *composite)
            .and(&solution)
            .for_each(|out, &v| *out = v.clamp(0.0, 255.0));
        debug!(
            pixels = interior.len(),
            iterations = self.iterations,
            "seam smoothing applied"
        );
        SeamBlend::Applied {
            pixels: interior.len(),
        }
    }
}

// Masked pixels with all four neighbours inside the canvas, row-major
fn interior_pixels(mask: &PixelMask) -> Vec<(usize, usize)> {
    let (width, height) = (mask.width(), mask.height());
    let mut pixels = Vec::new();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if mask.get(x, y) {
                pixels.push((y as usize, x as usize));
            }
        }
    }
    pixels
}
