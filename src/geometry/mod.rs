//! Planar geometry primitives used by landmark analysis and morphing
//!
//! This module contains:
//! - Points and ordered landmark sets
//! - Delaunay triangulation over a bounded rectangle
//! - Affine maps between triangles
//! - Pixel masks, triangle rasterization and convex hulls

/// Affine transforms estimated from triangle correspondences
pub mod affine;
/// Points and landmark sets
pub mod point;
/// Pixel masks, rasterization and hulls
pub mod raster;
/// Bowyer-Watson Delaunay triangulation
pub mod triangulation;

pub use point::{LandmarkSet, Point};
