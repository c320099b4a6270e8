//! Error metrics for computed solutions

use crate::dense::{ensure_len, ensure_square, finite_or_overflow, mat_vec};
use crate::error::Result;
use crate::norms::{vector_max_abs, vector_norm};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Euclidean distance between a computed solution and a reference solution,
/// sqrt(Σ (x_i - reference_i)^2)
pub fn residual<T: RealField>(x: &Array1<T>, reference: &Array1<T>) -> Result<T> {
    ensure_len(reference, x.len())?;
    finite_or_overflow(vector_norm(&(x - reference)), "error norm")
}

/// Largest absolute component of Ax - b
///
/// Measures how well x satisfies the system without needing a reference
/// solution.
pub fn backward_error<T: RealField>(a: &Array2<T>, x: &Array1<T>, b: &Array1<T>) -> Result<T> {
    let n = ensure_square(a)?;
    ensure_len(b, n)?;
    let ax = mat_vec(a, x)?;
    finite_or_overflow(vector_max_abs(&(&ax - b)), "backward error")
}
