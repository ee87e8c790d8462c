//! Morphed reference image generation
//!
//! This module contains:
//! - Float canvases and 8-bit conversions
//! - Per-triangle affine sampling with reflected borders
//! - Poisson seam smoothing of the face region
//! - The morphing engine tying them together

/// Float canvases, resizing and weighted blends
pub mod canvas;
/// Triangulated morph of two parents onto a child layout
pub mod engine;
/// Seamless-clone seam smoothing
pub mod seam;
/// Triangle warping by inverse affine sampling
pub mod warp;

pub use engine::{Composite, MorphConfig, MorphResult, MorphSource, MorphingEngine};
pub use seam::{SeamBlend, SeamSkipReason};
