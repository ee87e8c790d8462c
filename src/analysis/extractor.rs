//! Landmark detection and metric extraction for a single face image

use image::RgbImage;
use tracing::{debug, info};

use crate::analysis::detector::{FaceMesh, LandmarkDetector};
use crate::analysis::features::SkinColor;
use crate::analysis::landmarks::{
    LEFT_CHEEK_QUAD, MORPH_INDICES, REQUIRED_LANDMARKS, RIGHT_CHEEK_QUAD,
};
use crate::analysis::metrics::{GeometryMetrics, MetricOptions, compute_metrics};
use crate::analysis::skin::sample_skin;
use crate::geometry::{LandmarkSet, Point};
use crate::io::error::{KinError, Parent, Result};

/// Geometry, colour and morph landmarks extracted from one image
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnalysis {
    /// Distances, ratios and the double-eyelid heuristic
    pub metrics: GeometryMetrics,
    /// Mean cheek colour
    pub skin: SkinColor,
    /// Morph subset of the mesh in pixel coordinates
    pub morph_landmarks: LandmarkSet,
    /// Width of the analysed image
    pub width: u32,
    /// Height of the analysed image
    pub height: u32,
}

/// Runs the owned landmark detector and converts its output into metrics
///
/// The extractor holds no mutable state; sharing it between threads is safe
/// whenever the detector is, which [`LandmarkDetector`] requires.
pub struct Extractor<D> {
    detector: D,
    options: MetricOptions,
}

impl<D: LandmarkDetector> Extractor<D> {
    /// Take ownership of a detector with default metric options
    pub fn new(detector: D) -> Self {
        Self::with_options(detector, MetricOptions::default())
    }

    /// Take ownership of a detector with explicit metric options
    pub const fn with_options(detector: D, options: MetricOptions) -> Self {
        Self { detector, options }
    }

    /// The detector this extractor runs
    pub const fn detector(&self) -> &D {
        &self.detector
    }

    /// Analyse one face image
    ///
    /// # Errors
    ///
    /// Returns an error attributed to `parent` if:
    /// - The image has zero width or height (`DecodeFailure`)
    /// - The detector reports no face (`NoFaceDetected`)
    /// - The first face has fewer landmarks than the metrics need (`IncompleteLandmarks`)
    pub fn analyze(&self, image: &RgbImage, parent: Parent) -> Result<FaceAnalysis> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(KinError::DecodeFailure {
                parent,
                reason: "image has no pixels".to_string(),
            });
        }

        let faces = self.detector.detect(image);
        debug!(%parent, faces = faces.len(), "landmark detection finished");
        let mesh = faces
            .into_iter()
            .next()
            .ok_or(KinError::NoFaceDetected { parent })?;

        if mesh.len() < REQUIRED_LANDMARKS {
            return Err(KinError::IncompleteLandmarks {
                parent,
                required: REQUIRED_LANDMARKS,
                found: mesh.len(),
            });
        }

        let analysis = analyze_mesh(image, &mesh, &self.options);
        info!(
            %parent,
            landmarks = mesh.len(),
            morph_landmarks = analysis.morph_landmarks.len(),
            skin_l = analysis.skin.l,
            "face analysis complete"
        );
        Ok(analysis)
    }
}

/// Convert a complete mesh into a [`FaceAnalysis`]
///
/// Indices beyond the mesh resolve to the origin; [`Extractor::analyze`]
/// rejects meshes shorter than [`REQUIRED_LANDMARKS`] before calling this.
pub fn analyze_mesh(image: &RgbImage, mesh: &FaceMesh, options: &MetricOptions) -> FaceAnalysis {
    let (width, height) = image.dimensions();
    let (w, h) = (f64::from(width), f64::from(height));
    let px = |index: usize| -> Point {
        mesh.get(index)
            .map_or_else(Point::default, |lm| Point::new(lm.x * w, lm.y * h))
    };

    let metrics = compute_metrics(&px, options);

    let quads = [LEFT_CHEEK_QUAD, RIGHT_CHEEK_QUAD].map(|quad| quad.map(&px));
    let skin = sample_skin(image, &quads);

    let morph_landmarks: LandmarkSet = MORPH_INDICES
        .iter()
        .filter(|&&index| index < mesh.len())
        .map(|&index| px(index))
        .collect::<Vec<_>>()
        .into();

    FaceAnalysis {
        metrics,
        skin,
        morph_landmarks,
        width,
        height,
    }
}
