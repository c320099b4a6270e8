//! Condition number estimate
//!
//! The inverse of A is assembled column by column from its unpivoted LU
//! factors: for each basis vector e_i, solve L y = e_i then U z = y, and z is
//! column i of A⁻¹. The estimate is `‖A‖·‖A⁻¹‖` under the configured
//! [`MatrixNorm`], by default the row sum-of-squares proxy (see
//! [`crate::norms`]).
//!
//! Because the factorization does not pivot, matrices with a singular leading
//! principal submatrix are reported as singular here even when elimination
//! with pivoting can still solve them.

use crate::config::SolverConfig;
use crate::dense::{ensure_square, finite_or_overflow};
use crate::direct::{LuFactors, factorize_lu_with_epsilon};
use crate::error::Result;
use crate::norms::MatrixNorm;
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Approximate inverse of A built from its LU factors
pub fn approximate_inverse<T: RealField>(a: &Array2<T>) -> Result<Array2<T>> {
    approximate_inverse_with_epsilon(a, SolverConfig::default().pivot_epsilon)
}

/// Approximate inverse with an explicit singularity threshold
pub fn approximate_inverse_with_epsilon<T: RealField>(
    a: &Array2<T>,
    epsilon: f64,
) -> Result<Array2<T>> {
    ensure_square(a)?;
    let lu = factorize_lu_with_epsilon(a, epsilon)?;
    inverse_from_factors(&lu)
}

fn inverse_from_factors<T: RealField>(lu: &LuFactors<T>) -> Result<Array2<T>> {
    let n = lu.n;
    let mut inverse: Array2<T> = Array2::zeros((n, n));
    let mut e: Array1<T> = Array1::zeros(n);

    for i in 0..n {
        e[i] = T::one();
        let z = lu.solve(&e)?;
        inverse.column_mut(i).assign(&z);
        e[i] = T::zero();
    }

    Ok(inverse)
}

/// Condition estimate of A with the default configuration
///
/// Returns 1 for the identity matrix; larger values mean the solution of
/// Ax = b is more sensitive to perturbations of A or b.
pub fn estimate_condition<T: RealField>(a: &Array2<T>) -> Result<T> {
    estimate_condition_with(a, &SolverConfig::default())
}

/// Condition estimate of A using the epsilon and norm from `config`
pub fn estimate_condition_with<T: RealField>(a: &Array2<T>, config: &SolverConfig) -> Result<T> {
    let inverse = approximate_inverse_with_epsilon(a, config.pivot_epsilon)?;
    let estimate = finite_or_overflow(
        condition_from_inverse(a, &inverse, config.condition_norm),
        "condition estimate",
    )?;

    if estimate.to_f64_lossy() > config.ill_conditioned_threshold {
        log::warn!(
            "Matrix of size {} is ill-conditioned: {} condition estimate = {:.3e}",
            a.nrows(),
            config.condition_norm.name(),
            estimate.to_f64_lossy()
        );
    }

    Ok(estimate)
}

/// ‖A‖·‖A⁻¹‖ for an already computed inverse
pub fn condition_from_inverse<T: RealField>(
    a: &Array2<T>,
    inverse: &Array2<T>,
    norm: MatrixNorm,
) -> T {
    norm.apply(a) * norm.apply(inverse)
}
