//! Linear system descriptions loaded from JSON
//!
//! ```json
//! {
//!   "a": [[4.0, 3.0], [6.0, 3.0]],
//!   "b": [10.0, 12.0],
//!   "reference": [1.0, 2.0]
//! }
//! ```
//!
//! `reference` is optional and defaults to the all-ones vector.

use crate::dense::{
    ensure_finite_matrix, ensure_finite_vector, hilbert, matrix_from_rows, matrix_to_rows, ones,
};
use crate::error::{ConfigError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A square system Ax = b with an optional reference solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSystem {
    /// Coefficient matrix, row-major
    pub a: Vec<Vec<f64>>,
    /// Right-hand side
    pub b: Vec<f64>,
    /// Reference solution for the error norm (all ones when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Vec<f64>>,
}

/// Arrays ready to hand to the solvers
#[derive(Debug, Clone, PartialEq)]
pub struct SystemArrays {
    pub a: Array2<f64>,
    pub b: Array1<f64>,
    pub reference: Array1<f64>,
}

impl LinearSystem {
    /// The 4×4 system the interactive demonstration starts with
    pub fn demo() -> Self {
        Self {
            a: vec![
                vec![1.0, 2.0, 1.0, -1.0],
                vec![3.0, 2.0, 4.0, 4.0],
                vec![4.0, 4.0, 3.0, 4.0],
                vec![2.0, 0.0, 1.0, 5.0],
            ],
            b: vec![5.0, 16.0, 22.0, 15.0],
            reference: None,
        }
    }

    /// n×n Hilbert matrix with b chosen so that the all-ones vector is the
    /// exact solution
    pub fn hilbert(n: usize) -> Self {
        let h: Array2<f64> = hilbert(n);
        let reference = ones(n);
        let b = h.dot(&reference);
        Self {
            a: matrix_to_rows(&h),
            b: b.to_vec(),
            reference: Some(reference.to_vec()),
        }
    }

    /// Load a system from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a system from a JSON string
    pub fn from_json(contents: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Save the system to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Convert into arrays, rejecting ragged rows and non-finite values.
    ///
    /// Only the matrix shape is checked here; squareness and length agreement
    /// are checked by the solver that consumes the arrays.
    pub fn to_arrays(&self) -> Result<SystemArrays> {
        let a = matrix_from_rows(&self.a)?;
        let b = Array1::from_vec(self.b.clone());
        let reference = match &self.reference {
            Some(r) => Array1::from_vec(r.clone()),
            None => ones(b.len()),
        };
        ensure_finite_matrix(&a)?;
        ensure_finite_vector(&b)?;
        ensure_finite_vector(&reference)?;
        Ok(SystemArrays { a, b, reference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_without_reference() {
        let system =
            LinearSystem::from_json(r#"{ "a": [[4, 3], [6, 3]], "b": [10, 12] }"#).unwrap();
        let arrays = system.to_arrays().unwrap();
        assert_eq!(arrays.a.dim(), (2, 2));
        assert_eq!(arrays.reference.to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let system = LinearSystem::from_json(r#"{ "a": [[1, 2], [3]], "b": [1, 2] }"#).unwrap();
        assert!(matches!(
            system.to_arrays(),
            Err(SolverError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = LinearSystem::from_json(r#"{ "a": [[1]] }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_hilbert_system() {
        let system = LinearSystem::hilbert(3);
        assert_relative_eq!(system.a[1][2], 0.25);
        assert_relative_eq!(system.b[0], 1.0 + 0.5 + 1.0 / 3.0, epsilon = 1e-15);
        assert_eq!(system.reference, Some(vec![1.0; 3]));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "math_linsys_system_{}.json",
            std::process::id()
        ));
        let system = LinearSystem::demo();
        system.to_file(&path).unwrap();
        let loaded = LinearSystem::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, system);
    }
}
