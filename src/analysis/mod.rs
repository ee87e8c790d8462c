//! Face analysis: landmark detection, geometry metrics and trait classification

/// Threshold-based trait categories
pub mod classifier;
/// Landmark detector seam and lookup implementation
pub mod detector;
/// Detector invocation and per-image analysis
pub mod extractor;
/// Typed feature records shared by parents and child
pub mod features;
/// Canonical face-mesh indices
pub mod landmarks;
/// Distance and ratio metrics
pub mod metrics;
/// Cheek colour sampling in LAB space
pub mod skin;
