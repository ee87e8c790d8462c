//! End-to-end prediction: analyse both parents, blend, then morph
//!
//! Stages run strictly in order. The two parents are analysed concurrently
//! on scoped threads, so the detector must be shareable. Fatal conditions
//! abort with a [`KinError`] naming the parent; recoverable ones are reported
//! as [`Degradation`] values on the outcome.

use std::fmt;

use image::RgbImage;
use rand::Rng;
use tracing::{info, warn};

use crate::analysis::classifier::Classifier;
use crate::analysis::detector::LandmarkDetector;
use crate::analysis::extractor::{Extractor, FaceAnalysis};
use crate::analysis::features::{ChildFeatureSet, ParentFeatureSet};
use crate::genetics::blending::{BlendingEngine, LandmarkBlend};
use crate::genetics::config::GeneticsConfig;
use crate::io::error::{KinError, Parent, Result};
use crate::morph::{Composite, MorphConfig, MorphResult, MorphSource, MorphingEngine};
use crate::morph::{SeamBlend, SeamSkipReason};

/// Recoverable condition encountered during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// Parent landmark sets differed in length or were empty
    LandmarkMismatch {
        /// Landmark count of parent A
        parent_a: usize,
        /// Landmark count of parent B
        parent_b: usize,
    },
    /// The child layout produced no triangles; the reference is a flat blend
    DegenerateTriangulation,
    /// Seam smoothing was not applied
    SeamBlendSkipped(SeamSkipReason),
    /// No child landmarks, so no reference image was produced
    MorphSkipped,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandmarkMismatch { parent_a, parent_b } => write!(
                f,
                "landmark counts differ ({parent_a} vs {parent_b}), child landmarks omitted"
            ),
            Self::DegenerateTriangulation => {
                write!(f, "triangulation failed, reference is a weighted blend")
            }
            Self::SeamBlendSkipped(reason) => write!(f, "seam smoothing skipped: {reason}"),
            Self::MorphSkipped => write!(f, "no child landmarks, reference image unavailable"),
        }
    }
}

/// Morphed reference image, or why there is none
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceImage {
    /// Morph produced an image
    Available(MorphResult),
    /// Morph was not attempted
    Unavailable(Degradation),
}

impl ReferenceImage {
    /// The morph result when available
    pub const fn result(&self) -> Option<&MorphResult> {
        match self {
            Self::Available(result) => Some(result),
            Self::Unavailable(_) => None,
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Features of parent A
    pub parent_a: ParentFeatureSet,
    /// Features of parent B
    pub parent_b: ParentFeatureSet,
    /// Predicted child features
    pub child: ChildFeatureSet,
    /// Morphed reference image
    pub reference: ReferenceImage,
    /// Recoverable conditions, in the order they occurred
    pub degradations: Vec<Degradation>,
}

/// Pipeline stage reported to progress observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Landmark detection and metric extraction for both parents
    Analysis,
    /// Genetic blending of the two feature records
    Blending,
    /// Reference image generation
    Morphing,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Self; 3] = [Self::Analysis, Self::Blending, Self::Morphing];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analysis => write!(f, "analysing parents"),
            Self::Blending => write!(f, "blending features"),
            Self::Morphing => write!(f, "morphing reference"),
        }
    }
}

/// Decode image bytes into an RGB buffer attributed to `parent`
///
/// # Errors
///
/// Returns `DecodeFailure` if the bytes are not a supported image or decode to zero pixels
pub fn decode_image(bytes: &[u8], parent: Parent) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| KinError::DecodeFailure {
            parent,
            reason: e.to_string(),
        })?
        .to_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(KinError::DecodeFailure {
            parent,
            reason: "image has no pixels".to_string(),
        });
    }
    Ok(image)
}

/// Owns every stage's engine; reusable across runs
pub struct Pipeline<D> {
    extractor: Extractor<D>,
    classifier: Classifier,
    blending: BlendingEngine,
    morphing: MorphingEngine,
}

impl<D: LandmarkDetector> Pipeline<D> {
    /// Build a pipeline around a detector
    pub fn new(detector: D, genetics: &GeneticsConfig, morph: MorphConfig) -> Self {
        Self {
            extractor: Extractor::with_options(detector, genetics.metrics),
            classifier: Classifier::new(genetics.thresholds),
            blending: BlendingEngine::from_config(genetics),
            morphing: MorphingEngine::new(morph),
        }
    }

    /// Blending engine in use
    pub const fn blending(&self) -> &BlendingEngine {
        &self.blending
    }

    /// Analyse and classify one parent
    ///
    /// # Errors
    ///
    /// Propagates extraction failures attributed to `parent`
    pub fn analyze_parent(
        &self,
        image: &RgbImage,
        parent: Parent,
    ) -> Result<(FaceAnalysis, ParentFeatureSet)> {
        let analysis = self.extractor.analyze(image, parent)?;
        let features = self.classifier.parent_features(&analysis);
        Ok((analysis, features))
    }

    /// Run every stage
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; parent A's failure wins when both fail
    pub fn run<R: Rng + ?Sized>(
        &self,
        parent_a: &RgbImage,
        parent_b: &RgbImage,
        rng: &mut R,
    ) -> Result<PipelineOutcome> {
        self.run_observed(parent_a, parent_b, rng, |_| {})
    }

    /// Run every stage, calling `on_stage` as each one starts
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; parent A's failure wins when both fail
    pub fn run_observed<R: Rng + ?Sized>(
        &self,
        parent_a: &RgbImage,
        parent_b: &RgbImage,
        rng: &mut R,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<PipelineOutcome> {
        on_stage(Stage::Analysis);
        let (result_a, result_b) = std::thread::scope(|scope| {
            let handle = scope.spawn(|| self.analyze_parent(parent_a, Parent::A));
            let result_b = self.analyze_parent(parent_b, Parent::B);
            let result_a = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (result_a, result_b)
        });
        let (_, features_a) = result_a?;
        let (_, features_b) = result_b?;

        on_stage(Stage::Blending);
        let blend = self.blending.blend(&features_a, &features_b, rng);
        let mut degradations = Vec::new();
        if let LandmarkBlend::Mismatch {
            parent_a: count_a,
            parent_b: count_b,
        } = blend.landmarks
        {
            warn!(count_a, count_b, "landmark counts differ, skipping landmark blend");
            degradations.push(Degradation::LandmarkMismatch {
                parent_a: count_a,
                parent_b: count_b,
            });
        }

        on_stage(Stage::Morphing);
        let reference = if blend.child.landmarks.is_empty() {
            warn!("no child landmarks, reference image unavailable");
            degradations.push(Degradation::MorphSkipped);
            ReferenceImage::Unavailable(Degradation::MorphSkipped)
        } else {
            let result = self.morphing.morph(
                MorphSource {
                    image: parent_a,
                    landmarks: &features_a.landmarks,
                },
                MorphSource {
                    image: parent_b,
                    landmarks: &features_b.landmarks,
                },
                &blend.child.landmarks,
            )?;
            if result.composite == Composite::FallbackBlend {
                degradations.push(Degradation::DegenerateTriangulation);
            }
            if let SeamBlend::Skipped(reason) = result.seam
                && !matches!(
                    reason,
                    SeamSkipReason::Disabled | SeamSkipReason::NotTriangulated
                )
            {
                degradations.push(Degradation::SeamBlendSkipped(reason));
            }
            ReferenceImage::Available(result)
        };

        info!(
            degradations = degradations.len(),
            reference = reference.result().is_some(),
            "prediction complete"
        );
        Ok(PipelineOutcome {
            parent_a: features_a,
            parent_b: features_b,
            child: blend.child,
            reference,
            degradations,
        })
    }
}
