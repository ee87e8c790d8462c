//! Versioned genetics configuration loaded once per process

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::classifier::ClassificationThresholds;
use crate::analysis::metrics::MetricOptions;
use crate::genetics::blending::BlendingParameters;
use crate::genetics::sampling::LambdaSpec;
use crate::genetics::tables::{HeritabilityTable, MendelianProbabilityTable};
use crate::io::configuration::GENETICS_CONFIG_VERSION;
use crate::io::error::{KinError, Result, file_system_error, invalid_parameter};

/// All tunable coefficients of the inheritance model
///
/// Fields missing from a JSON document take their built-in defaults, so a
/// file may override a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Free-form version tag recorded alongside results
    pub version: String,
    /// Polygenic heritability coefficients
    pub heritability: HeritabilityTable,
    /// Mendelian expression probabilities
    pub mendelian: MendelianProbabilityTable,
    /// Category bin edges
    pub thresholds: ClassificationThresholds,
    /// Weight distributions and noise scales
    pub blending: BlendingParameters,
    /// Metric heuristics
    pub metrics: MetricOptions,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            version: GENETICS_CONFIG_VERSION.to_string(),
            heritability: HeritabilityTable::default(),
            mendelian: MendelianProbabilityTable::default(),
            thresholds: ClassificationThresholds::default(),
            blending: BlendingParameters::default(),
            metrics: MetricOptions::default(),
        }
    }
}

fn check_unit_interval(parameter: &'static str, key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &format!("{key}={value}"),
            &"must lie in [0, 1]",
        ))
    }
}

fn check_lambda(parameter: &'static str, spec: &LambdaSpec) -> Result<()> {
    let values = [spec.mean, spec.std_dev, spec.min, spec.max];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid_parameter(parameter, &format!("{spec:?}"), &"must be finite"));
    }
    if spec.std_dev < 0.0 {
        return Err(invalid_parameter(
            parameter,
            &spec.std_dev,
            &"standard deviation must be non-negative",
        ));
    }
    if spec.min > spec.max {
        return Err(invalid_parameter(
            parameter,
            &format!("[{}, {}]", spec.min, spec.max),
            &"lower bound exceeds upper bound",
        ));
    }
    check_unit_interval(parameter, "min", spec.min)?;
    check_unit_interval(parameter, "max", spec.max)
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(parameter, &value, &"must be finite and non-negative"))
    }
}

impl GeneticsConfig {
    /// Parse a configuration from JSON text and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any coefficient fails validation
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| KinError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| file_system_error(path, "read configuration", source))?;
        Self::from_json_str(&json, path)
    }

    /// Check every coefficient against its admissible range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending table or field
    pub fn validate(&self) -> Result<()> {
        for (key, h2) in self.heritability.iter() {
            check_unit_interval("heritability", key, h2)?;
        }
        for (key, probs) in self.mendelian.iter() {
            check_unit_interval("mendelian", key, probs.both_dominant)?;
            check_unit_interval("mendelian", key, probs.one_dominant)?;
            check_unit_interval("mendelian", key, probs.both_recessive)?;
            if !probs.is_monotonic() {
                return Err(invalid_parameter(
                    "mendelian",
                    &key,
                    &"probabilities must not increase as dominant parents decrease",
                ));
            }
        }

        let blending = &self.blending;
        check_lambda("blending.polygenic_lambda", &blending.polygenic_lambda)?;
        check_lambda("blending.skin_lambda", &blending.skin_lambda)?;
        check_lambda("blending.landmark_lambda", &blending.landmark_lambda)?;
        check_non_negative("blending.polygenic_noise_scale", blending.polygenic_noise_scale)?;
        check_non_negative("blending.skin_noise_scale", blending.skin_noise_scale)?;
        check_unit_interval(
            "blending.narrow_nose_probability",
            "narrow",
            blending.narrow_nose_probability,
        )?;
        check_non_negative(
            "metrics.double_eyelid_factor",
            self.metrics.double_eyelid_factor,
        )
    }
}
