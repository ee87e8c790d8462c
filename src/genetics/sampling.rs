//! Random draws used by the blending engine
//!
//! Every function takes the generator explicitly so callers control seeding
//! and no state is shared between concurrent blends.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Draw from `N(mean, std_dev)`
///
/// A zero, negative or non-finite standard deviation returns `mean` without
/// consuming randomness.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return mean;
    }
    Normal::new(mean, std_dev).map_or(mean, |normal| normal.sample(rng))
}

/// Single Bernoulli trial; probabilities outside `[0, 1]` saturate
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Pick one of two values with equal probability
pub fn coin_flip<T, R: Rng + ?Sized>(rng: &mut R, first: T, second: T) -> T {
    if rng.random_bool(0.5) { first } else { second }
}

/// Clipped normal distribution for parental bias weights
///
/// The three weight families (polygenic traits, skin colour, landmarks) use
/// different bounds. The bounds are tunable heuristics, not derived from
/// population data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambdaSpec {
    /// Centre of the normal draw
    pub mean: f64,
    /// Spread of the normal draw
    pub std_dev: f64,
    /// Lower clip bound
    pub min: f64,
    /// Upper clip bound
    pub max: f64,
}

impl LambdaSpec {
    /// Create a clipped normal specification
    pub const fn new(mean: f64, std_dev: f64, min: f64, max: f64) -> Self {
        Self {
            mean,
            std_dev,
            min,
            max,
        }
    }

    /// Polygenic weight: `N(0.5, 0.1)` clipped to `[0.15, 0.85]`
    pub const fn polygenic() -> Self {
        Self::new(0.5, 0.1, 0.15, 0.85)
    }

    /// Skin colour weight: `N(0.5, 0.08)` clipped to `[0.2, 0.8]`
    pub const fn skin() -> Self {
        Self::new(0.5, 0.08, 0.2, 0.8)
    }

    /// Landmark weight: `N(0.5, 0.08)` clipped to `[0.3, 0.7]`
    pub const fn landmarks() -> Self {
        Self::new(0.5, 0.08, 0.3, 0.7)
    }

    /// Fixed weight with no spread
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0, value, value)
    }

    /// Draw a weight within `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        gaussian(rng, self.mean, self.std_dev)
            .max(self.min)
            .min(self.max)
    }
}
