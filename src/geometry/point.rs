//! Planar points and ordered landmark sets

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between this point and another
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(f64::midpoint(self.x, other.x), f64::midpoint(self.y, other.y))
    }

    /// Linear interpolation `other + (self - other) * weight`
    ///
    /// Returns `self` exactly when both points coincide, for any weight.
    pub fn lerp_towards(&self, other: &Self, weight: f64) -> Self {
        Self::new(
            (self.x - other.x).mul_add(weight, other.x),
            (self.y - other.y).mul_add(weight, other.y),
        )
    }

    /// Scale each axis independently
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }

    /// Clamp into the rectangle `[0, max_x] x [0, max_y]`
    pub fn clamped(&self, max_x: f64, max_y: f64) -> Self {
        Self::new(self.x.clamp(0.0, max_x), self.y.clamp(0.0, max_y))
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Ordered landmark coordinates with a stable anatomical numbering
///
/// Positions follow the morph subset of the canonical face mesh, see
/// [`crate::analysis::landmarks::MORPH_INDICES`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Wrap an ordered point list
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Empty set, used when landmark blending is not possible
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of landmarks
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no landmarks
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at a position, if present
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// All landmarks in order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over landmarks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Copy with every landmark scaled per axis
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.points.iter().map(|p| p.scaled(sx, sy)).collect())
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
