//! Error types for math-linsys.

use thiserror::Error;

/// Errors reported by the dense solvers and their diagnostics
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Matrix is singular or nearly singular: pivot {index} is {value:e}")]
    SingularMatrix { index: usize, value: f64 },

    #[error("Non-finite input value at row {row}, column {col}")]
    NonFiniteInput { row: usize, col: usize },

    #[error("Numeric overflow in {context}: result is not finite")]
    NumericOverflow { context: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or saving JSON configuration and system files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    /// True for the singular-matrix outcome
    pub fn is_singular(&self) -> bool {
        matches!(self, SolverError::SingularMatrix { .. })
    }
}
