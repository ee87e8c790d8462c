//! Stochastic combination of two parent feature records into a child record
//!
//! Continuous traits use a parental-bias weight plus heritability-scaled
//! noise, binary traits a single Bernoulli draw against the Mendelian table,
//! and categories either a coin flip or reclassification of blended values.
//! The random generator is injected so a fixed seed reproduces a child.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::classifier::Classifier;
use crate::analysis::features::{
    Categories, ChildFeatureSet, MendelianFlags, MendelianTrait, Measurements, NoseShape,
    ParentFeatureSet, PolygenicTrait, SkinColor,
};
use crate::genetics::config::GeneticsConfig;
use crate::genetics::sampling::{LambdaSpec, bernoulli, coin_flip, gaussian};
use crate::genetics::tables::{
    GenotypeState, HeritabilityTable, MendelianProbabilityTable, SKIN_COLOR_KEY,
};
use crate::geometry::LandmarkSet;

/// Weight distributions and noise scales of the blending model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendingParameters {
    /// Per-trait parental bias for continuous traits
    pub polygenic_lambda: LambdaSpec,
    /// Noise standard deviation per unit of mean parental magnitude at h² = 0
    pub polygenic_noise_scale: f64,
    /// Parental bias shared by the three skin channels
    pub skin_lambda: LambdaSpec,
    /// Per-channel skin noise standard deviation at h² = 0
    pub skin_noise_scale: f64,
    /// Parental bias shared by every landmark
    pub landmark_lambda: LambdaSpec,
    /// Chance of a narrow nose when either parent has one
    pub narrow_nose_probability: f64,
}

impl Default for BlendingParameters {
    fn default() -> Self {
        Self {
            polygenic_lambda: LambdaSpec::polygenic(),
            polygenic_noise_scale: 0.15,
            skin_lambda: LambdaSpec::skin(),
            skin_noise_scale: 3.0,
            landmark_lambda: LambdaSpec::landmarks(),
            narrow_nose_probability: 0.65,
        }
    }
}

/// How the child landmark set was produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandmarkBlend {
    /// Every point interpolated with one shared weight toward parent A
    Blended {
        /// Weight of parent A
        lambda: f64,
    },
    /// Parents had different or empty landmark sets; the child has none
    Mismatch {
        /// Landmark count of parent A
        parent_a: usize,
        /// Landmark count of parent B
        parent_b: usize,
    },
}

/// Result of one blend
#[derive(Debug, Clone, PartialEq)]
pub struct BlendOutcome {
    /// Predicted child features
    pub child: ChildFeatureSet,
    /// Landmark interpolation status
    pub landmarks: LandmarkBlend,
}

/// Genetics-inspired blending over configurable coefficient tables
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlendingEngine {
    heritability: HeritabilityTable,
    mendelian: MendelianProbabilityTable,
    classifier: Classifier,
    parameters: BlendingParameters,
}

impl BlendingEngine {
    /// Create an engine from explicit tables
    pub const fn new(
        heritability: HeritabilityTable,
        mendelian: MendelianProbabilityTable,
        classifier: Classifier,
        parameters: BlendingParameters,
    ) -> Self {
        Self {
            heritability,
            mendelian,
            classifier,
            parameters,
        }
    }

    /// Create an engine from a loaded configuration
    pub fn from_config(config: &GeneticsConfig) -> Self {
        Self::new(
            config.heritability.clone(),
            config.mendelian.clone(),
            Classifier::new(config.thresholds),
            config.blending,
        )
    }

    /// Weight distributions in use
    pub const fn parameters(&self) -> &BlendingParameters {
        &self.parameters
    }

    /// Heritability table in use
    pub const fn heritability(&self) -> &HeritabilityTable {
        &self.heritability
    }

    /// Blend one continuous trait
    ///
    /// Noise is `N(0, (1 - h²) · scale · (|a| + |b|) / 2)`; identical
    /// zero-valued parents therefore always give zero.
    pub fn blend_polygenic<R: Rng + ?Sized>(
        &self,
        first: f64,
        second: f64,
        key: &str,
        rng: &mut R,
    ) -> f64 {
        let h2 = self.heritability.get(key);
        let lambda = self.parameters.polygenic_lambda.sample(rng);
        let base = lambda.mul_add(first, (1.0 - lambda) * second);
        let noise_sd = (1.0 - h2)
            * self.parameters.polygenic_noise_scale
            * f64::midpoint(first.abs(), second.abs());
        base + gaussian(rng, 0.0, noise_sd)
    }

    /// Blend two skin colours channel by channel with one shared weight
    pub fn blend_skin<R: Rng + ?Sized>(
        &self,
        first: SkinColor,
        second: SkinColor,
        rng: &mut R,
    ) -> SkinColor {
        let h2 = self.heritability.get(SKIN_COLOR_KEY);
        let lambda = self.parameters.skin_lambda.sample(rng);
        let noise_sd = (1.0 - h2) * self.parameters.skin_noise_scale;
        let [a, b] = [first.channels(), second.channels()];
        let mut channels = [0.0; 3];
        for ((out, x), y) in channels.iter_mut().zip(a).zip(b) {
            *out = lambda.mul_add(x, (1.0 - lambda) * y) + gaussian(rng, 0.0, noise_sd);
        }
        SkinColor::from(channels)
    }

    /// Decide whether the child expresses a binary trait
    pub fn resolve_mendelian<R: Rng + ?Sized>(
        &self,
        key: &str,
        first: bool,
        second: bool,
        rng: &mut R,
    ) -> bool {
        let state = GenotypeState::from_parents(first, second);
        bernoulli(rng, self.mendelian.get(key).for_state(state))
    }

    /// Interpolate two landmark sets with one shared weight
    ///
    /// Sets of different length, or an empty set on either side, yield an
    /// empty child set.
    pub fn blend_landmarks<R: Rng + ?Sized>(
        &self,
        first: &LandmarkSet,
        second: &LandmarkSet,
        rng: &mut R,
    ) -> (LandmarkSet, LandmarkBlend) {
        if first.is_empty() || second.is_empty() || first.len() != second.len() {
            return (
                LandmarkSet::empty(),
                LandmarkBlend::Mismatch {
                    parent_a: first.len(),
                    parent_b: second.len(),
                },
            );
        }
        let lambda = self.parameters.landmark_lambda.sample(rng);
        let points = first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| a.lerp_towards(b, lambda))
            .collect::<Vec<_>>();
        (LandmarkSet::from(points), LandmarkBlend::Blended { lambda })
    }

    fn blend_nose<R: Rng + ?Sized>(
        &self,
        first: NoseShape,
        second: NoseShape,
        rng: &mut R,
    ) -> NoseShape {
        if first == NoseShape::Narrow || second == NoseShape::Narrow {
            if bernoulli(rng, self.parameters.narrow_nose_probability) {
                NoseShape::Narrow
            } else {
                NoseShape::Normal
            }
        } else {
            coin_flip(rng, first, second)
        }
    }

    /// Produce a child record from two parents
    pub fn blend<R: Rng + ?Sized>(
        &self,
        first: &ParentFeatureSet,
        second: &ParentFeatureSet,
        rng: &mut R,
    ) -> BlendOutcome {
        let mut measurements = Measurements::default();
        for t in PolygenicTrait::ALL {
            *measurements.get_mut(t) = self.blend_polygenic(
                first.measurements.get(t),
                second.measurements.get(t),
                t.key(),
                rng,
            );
        }

        let skin = self.blend_skin(first.skin, second.skin, rng);

        let mut mendelian = MendelianFlags::default();
        for t in MendelianTrait::ALL {
            let present = self.resolve_mendelian(
                t.key(),
                first.mendelian.get(t),
                second.mendelian.get(t),
                rng,
            );
            mendelian.set(t, present);
        }

        let face_shape = coin_flip(
            rng,
            first.categories.face_shape,
            second.categories.face_shape,
        );
        let nose_shape = self.blend_nose(
            first.categories.nose_shape,
            second.categories.nose_shape,
            rng,
        );
        let categories = Categories {
            face_shape,
            nose_shape,
            eye_size: self.classifier.eye_size(measurements.eye_ratio),
            skin_tone: self.classifier.skin_tone(skin.l),
        };

        let (landmarks, landmark_status) =
            self.blend_landmarks(&first.landmarks, &second.landmarks, rng);
        debug!(
            landmarks = landmarks.len(),
            ?landmark_status,
            face_shape = %categories.face_shape,
            nose_shape = %categories.nose_shape,
            "blended child features"
        );

        BlendOutcome {
            child: ChildFeatureSet {
                measurements,
                mendelian,
                categories,
                skin,
                landmarks,
            },
            landmarks: landmark_status,
        }
    }
}
