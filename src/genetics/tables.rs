//! Heritability and Mendelian probability tables
//!
//! Both tables are plain data keyed by trait name. Lookups never fail: a
//! missing key yields the documented default so the blending engine keeps
//! working with partial configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::io::configuration::{DEFAULT_HERITABILITY, DEFAULT_MENDELIAN_PROBABILITY};

/// Table key for skin colour heritability
pub const SKIN_COLOR_KEY: &str = "skin_color";

/// Fraction of trait variance attributed to genetics, per trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeritabilityTable {
    coefficients: BTreeMap<String, f64>,
}

impl HeritabilityTable {
    /// Table from explicit coefficients
    pub fn new(coefficients: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            coefficients: coefficients.into_iter().collect(),
        }
    }

    /// Table with no entries; every lookup returns the default
    pub const fn empty() -> Self {
        Self {
            coefficients: BTreeMap::new(),
        }
    }

    /// h² for a trait, or 0.5 when the trait is not configured
    pub fn get(&self, key: &str) -> f64 {
        self.coefficients
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_HERITABILITY)
    }

    /// Whether the trait has an explicit coefficient
    pub fn contains(&self, key: &str) -> bool {
        self.coefficients.contains_key(key)
    }

    /// Configured entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.coefficients.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for HeritabilityTable {
    // Twin and family study estimates; nose_shape/face_shape/eyebrow_shape are kept for callers
    fn default() -> Self {
        Self::new(
            [
                ("eye_ratio", 0.4487),
                ("nose_shape", 0.668),
                ("face_shape", 0.70),
                ("lip_thickness", 0.60),
                (SKIN_COLOR_KEY, 0.80),
                ("interpupillary", 0.75),
                ("face_width", 0.72),
                ("nose_width", 0.668),
                ("nose_length", 0.65),
                ("eyebrow_shape", 0.433),
                ("jaw_width", 0.55),
            ]
            .map(|(k, v)| (k.to_string(), v)),
        )
    }
}

/// Parental genotype state inferred from trait presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenotypeState {
    /// Both parents show the trait
    BothDominant,
    /// Exactly one parent shows the trait
    OneDominant,
    /// Neither parent shows the trait
    BothRecessive,
}

impl GenotypeState {
    /// Classify from the two parents' flags
    pub const fn from_parents(first: bool, second: bool) -> Self {
        match (first, second) {
            (true, true) => Self::BothDominant,
            (true, false) | (false, true) => Self::OneDominant,
            (false, false) => Self::BothRecessive,
        }
    }
}

/// Probability of the child expressing a trait, per parental genotype state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MendelianProbabilities {
    /// Both parents express the trait
    pub both_dominant: f64,
    /// One parent expresses the trait
    pub one_dominant: f64,
    /// Neither parent expresses the trait
    pub both_recessive: f64,
}

impl MendelianProbabilities {
    /// Create an entry
    pub const fn new(both_dominant: f64, one_dominant: f64, both_recessive: f64) -> Self {
        Self {
            both_dominant,
            one_dominant,
            both_recessive,
        }
    }

    /// Probability for a genotype state
    pub const fn for_state(&self, state: GenotypeState) -> f64 {
        match state {
            GenotypeState::BothDominant => self.both_dominant,
            GenotypeState::OneDominant => self.one_dominant,
            GenotypeState::BothRecessive => self.both_recessive,
        }
    }

    /// Whether expression probability never increases as dominant parents decrease
    pub fn is_monotonic(&self) -> bool {
        self.both_dominant >= self.one_dominant && self.one_dominant >= self.both_recessive
    }
}

impl Default for MendelianProbabilities {
    fn default() -> Self {
        Self::new(
            DEFAULT_MENDELIAN_PROBABILITY,
            DEFAULT_MENDELIAN_PROBABILITY,
            DEFAULT_MENDELIAN_PROBABILITY,
        )
    }
}

/// Expression probabilities for binary traits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MendelianProbabilityTable {
    traits: BTreeMap<String, MendelianProbabilities>,
}

impl MendelianProbabilityTable {
    /// Table from explicit entries
    pub fn new(traits: impl IntoIterator<Item = (String, MendelianProbabilities)>) -> Self {
        Self {
            traits: traits.into_iter().collect(),
        }
    }

    /// Table with no entries; every lookup returns 0.5/0.5/0.5
    pub const fn empty() -> Self {
        Self {
            traits: BTreeMap::new(),
        }
    }

    /// Entry for a trait, or the uniform default when not configured
    pub fn get(&self, key: &str) -> MendelianProbabilities {
        self.traits.get(key).copied().unwrap_or_default()
    }

    /// Configured entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MendelianProbabilities)> {
        self.traits.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for MendelianProbabilityTable {
    fn default() -> Self {
        Self::new(
            [
                ("double_eyelid", MendelianProbabilities::new(0.62, 0.43, 0.05)),
                ("dimple", MendelianProbabilities::new(0.90, 0.75, 0.02)),
                ("cleft_chin", MendelianProbabilities::new(0.85, 0.50, 0.02)),
                ("widows_peak", MendelianProbabilities::new(0.80, 0.50, 0.05)),
            ]
            .map(|(k, v)| (k.to_string(), v)),
        )
    }
}
