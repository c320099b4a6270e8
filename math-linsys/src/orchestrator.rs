//! Orchestrated solve: solution plus its diagnostics
//!
//! Runs Gaussian elimination with partial pivoting, the LU-based condition
//! estimate and the residual against a reference solution, and returns all
//! three together or a single error.

use crate::conditioning::estimate_condition_with;
use crate::config::SolverConfig;
use crate::dense::{ensure_len, ensure_system};
use crate::direct::GaussianElimination;
use crate::error::Result;
use crate::residual::residual;
use crate::traits::{DirectSolver, RealField};
use ndarray::{Array1, Array2};
use serde::{Serialize, Serializer};

/// Solution of Ax = b with its diagnostics
///
/// Serializes to `{"x": [..], "error_norm": .., "condition_estimate": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult<T: RealField> {
    /// Solution vector
    #[serde(serialize_with = "serialize_vector")]
    pub x: Array1<T>,
    /// Euclidean distance between x and the reference solution
    pub error_norm: T,
    /// Condition estimate of A
    pub condition_estimate: T,
}

fn serialize_vector<T, S>(v: &Array1<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    serializer.collect_seq(v.iter())
}

/// Dense system solver bundling elimination and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DenseSystemSolver {
    config: SolverConfig,
}

impl DenseSystemSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve Ax = b and measure the result against `reference`.
    ///
    /// All shapes are checked before any computation. Inputs are only
    /// borrowed, so repeated calls with the same inputs return the same result.
    pub fn solve<T: RealField>(
        &self,
        a: &Array2<T>,
        b: &Array1<T>,
        reference: &Array1<T>,
    ) -> Result<SolveResult<T>> {
        let n = ensure_system(a, b)?;
        ensure_len(reference, n)?;

        let x = GaussianElimination::new(self.config.pivot_epsilon).solve(a, b)?;
        let condition_estimate = estimate_condition_with(a, &self.config)?;
        let error_norm = residual(&x, reference)?;

        log::debug!(
            "Solved {}x{} system: error norm = {:.6e}, condition estimate = {:.6e}",
            n,
            n,
            error_norm.to_f64_lossy(),
            condition_estimate.to_f64_lossy()
        );

        Ok(SolveResult {
            x,
            error_norm,
            condition_estimate,
        })
    }
}

/// Solve Ax = b with the default configuration and report error norm and
/// condition estimate
pub fn orchestrate_solve<T: RealField>(
    a: &Array2<T>,
    b: &Array1<T>,
    reference: &Array1<T>,
) -> Result<SolveResult<T>> {
    DenseSystemSolver::default().solve(a, b, reference)
}
