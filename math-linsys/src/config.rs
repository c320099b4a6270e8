//! JSON configuration for the dense solvers

use crate::error::ConfigError;
use crate::norms::MatrixNorm;
use crate::traits::RealField;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default relative threshold below which a pivot or diagonal entry counts as zero
pub const DEFAULT_PIVOT_EPSILON: f64 = 1e-12;

/// Condition estimates above this value are logged as a warning
pub const DEFAULT_ILL_CONDITIONED_THRESHOLD: f64 = 1e12;

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative singularity threshold, see [`pivot_tolerance`]
    #[serde(default = "default_pivot_epsilon")]
    pub pivot_epsilon: f64,
    /// Norm used for the condition estimate
    #[serde(default)]
    pub condition_norm: MatrixNorm,
    /// Condition estimates above this threshold emit a warning
    #[serde(default = "default_ill_conditioned_threshold")]
    pub ill_conditioned_threshold: f64,
}

/// Absolute threshold for the pivots of an n×n matrix whose largest entry
/// has magnitude `scale`.
///
/// A pivot or diagonal entry counts as zero when
/// `|value| <= max(epsilon, n·ε) · scale`, where ε is the machine epsilon of
/// `T`. Scaling by the matrix makes the test independent of units, and the
/// `n·ε` floor keeps f32 systems above their own rounding error.
pub fn pivot_tolerance<T: RealField>(epsilon: f64, scale: T, n: usize) -> T {
    let floor = T::epsilon() * T::from_f64_lossy(n as f64);
    T::from_f64_lossy(epsilon).max(floor) * scale
}

fn default_pivot_epsilon() -> f64 {
    DEFAULT_PIVOT_EPSILON
}

fn default_ill_conditioned_threshold() -> f64 {
    DEFAULT_ILL_CONDITIONED_THRESHOLD
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_epsilon: DEFAULT_PIVOT_EPSILON,
            condition_norm: MatrixNorm::default(),
            ill_conditioned_threshold: DEFAULT_ILL_CONDITIONED_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Default configuration with a custom pivot epsilon
    pub fn with_epsilon(pivot_epsilon: f64) -> Self {
        Self {
            pivot_epsilon,
            ..Self::default()
        }
    }

    /// Check that the thresholds are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pivot_epsilon.is_finite() || self.pivot_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pivot_epsilon must be finite and non-negative, got {}",
                self.pivot_epsilon
            )));
        }
        if self.ill_conditioned_threshold.is_nan() || self.ill_conditioned_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ill_conditioned_threshold must be positive, got {}",
                self.ill_conditioned_threshold
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
