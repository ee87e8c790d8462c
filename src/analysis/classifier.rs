//! Threshold tables mapping continuous metrics to discrete trait categories

use serde::{Deserialize, Serialize};

use crate::analysis::extractor::FaceAnalysis;
use crate::analysis::features::{
    Categories, EyeSize, FaceShape, MendelianFlags, NoseShape, ParentFeatureSet, SkinTone,
};
use crate::analysis::metrics::GeometryMetrics;

/// Bin edges for every categorical trait
///
/// Comparisons are strict: a value equal to an edge falls into the lower
/// neighbouring bin (for descending tables) or the middle bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Face ratio above which the face is round
    pub face_round: f64,
    /// Face ratio above which the face is square
    pub face_square: f64,
    /// Face ratio above which the face is oval (otherwise long)
    pub face_oval: f64,
    /// Nose-to-face width ratio below which the nose is narrow
    pub nose_narrow: f64,
    /// Nose-to-face width ratio above which the nose is wide
    pub nose_wide: f64,
    /// Eye ratio above which eyes are large
    pub eye_large: f64,
    /// Eye ratio below which eyes are small
    pub eye_small: f64,
    /// Lightness above which skin is fair
    pub skin_fair: f64,
    /// Lightness above which skin is light
    pub skin_light: f64,
    /// Lightness above which skin is medium (otherwise tan)
    pub skin_medium: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            face_round: 0.85,
            face_square: 0.78,
            face_oval: 0.72,
            nose_narrow: 0.18,
            nose_wide: 0.25,
            eye_large: 0.38,
            eye_small: 0.25,
            skin_fair: 180.0,
            skin_light: 150.0,
            skin_medium: 120.0,
        }
    }
}

/// Assigns categories from metrics using a fixed threshold table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Classifier {
    thresholds: ClassificationThresholds,
}

impl Classifier {
    /// Create a classifier over the given thresholds
    pub const fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Threshold table in use
    pub const fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Face shape from width over height
    pub fn face_shape(&self, face_ratio: f64) -> FaceShape {
        let t = &self.thresholds;
        if face_ratio > t.face_round {
            FaceShape::Round
        } else if face_ratio > t.face_square {
            FaceShape::Square
        } else if face_ratio > t.face_oval {
            FaceShape::Oval
        } else {
            FaceShape::Long
        }
    }

    /// Nose shape from nose width over face width
    pub fn nose_shape(&self, nose_ratio: f64) -> NoseShape {
        let t = &self.thresholds;
        if nose_ratio < t.nose_narrow {
            NoseShape::Narrow
        } else if nose_ratio > t.nose_wide {
            NoseShape::Wide
        } else {
            NoseShape::Normal
        }
    }

    /// Eye size from mean eye height over width
    pub fn eye_size(&self, eye_ratio: f64) -> EyeSize {
        let t = &self.thresholds;
        if eye_ratio > t.eye_large {
            EyeSize::Large
        } else if eye_ratio < t.eye_small {
            EyeSize::Small
        } else {
            EyeSize::Normal
        }
    }

    /// Skin description from the 8-bit LAB lightness channel
    pub fn skin_tone(&self, lightness: f64) -> SkinTone {
        let t = &self.thresholds;
        if lightness > t.skin_fair {
            SkinTone::Fair
        } else if lightness > t.skin_light {
            SkinTone::Light
        } else if lightness > t.skin_medium {
            SkinTone::Medium
        } else {
            SkinTone::Tan
        }
    }

    /// All four categories for a set of metrics and a skin lightness
    pub fn categorize(&self, metrics: &GeometryMetrics, lightness: f64) -> Categories {
        Categories {
            face_shape: self.face_shape(metrics.face_ratio()),
            nose_shape: self.nose_shape(metrics.nose_ratio()),
            eye_size: self.eye_size(metrics.measurements.eye_ratio),
            skin_tone: self.skin_tone(lightness),
        }
    }

    /// Assemble the parent record blended downstream
    ///
    /// Only the double eyelid is observable from landmarks; other binary
    /// traits start absent and may be set by the caller.
    pub fn parent_features(&self, analysis: &FaceAnalysis) -> ParentFeatureSet {
        ParentFeatureSet {
            measurements: analysis.metrics.measurements,
            mendelian: MendelianFlags {
                double_eyelid: analysis.metrics.double_eyelid,
                ..MendelianFlags::default()
            },
            categories: self.categorize(&analysis.metrics, analysis.skin.l),
            skin: analysis.skin,
            landmarks: analysis.morph_landmarks.clone(),
        }
    }
}
