//! Dense matrix and vector helpers
//!
//! Conversions from plain row-major data, shape validation shared by all
//! solvers, and a few generators used by the demonstrations and tests.

use crate::error::{Result, SolverError};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Build a matrix from row-major nested vectors.
///
/// Every row must have the same length as the first one; a ragged row is a
/// [`SolverError::DimensionMismatch`].
pub fn matrix_from_rows<T: RealField>(rows: &[Vec<T>]) -> Result<Array2<T>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, |r| r.len());

    let mut data = Vec::with_capacity(nrows * ncols);
    for row in rows {
        if row.len() != ncols {
            return Err(SolverError::DimensionMismatch {
                expected: ncols,
                got: row.len(),
            });
        }
        data.extend_from_slice(row);
    }

    Array2::from_shape_vec((nrows, ncols), data).map_err(|_| SolverError::DimensionMismatch {
        expected: nrows * ncols,
        got: rows.iter().map(Vec::len).sum(),
    })
}

/// Convert a matrix back into row-major nested vectors
pub fn matrix_to_rows<T: RealField>(m: &Array2<T>) -> Vec<Vec<T>> {
    m.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Require a square matrix and return its dimension
pub fn ensure_square<T: RealField>(a: &Array2<T>) -> Result<usize> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }
    Ok(n)
}

/// Require a vector of length `n`
pub fn ensure_len<T: RealField>(v: &Array1<T>, n: usize) -> Result<()> {
    if v.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: v.len(),
        });
    }
    Ok(())
}

/// Require a square matrix and a right-hand side of matching length
pub fn ensure_system<T: RealField>(a: &Array2<T>, b: &Array1<T>) -> Result<usize> {
    let n = ensure_square(a)?;
    ensure_len(b, n)?;
    ensure_finite_matrix(a)?;
    ensure_finite_vector(b)?;
    Ok(n)
}

/// Reject NaN or infinite matrix entries
pub fn ensure_finite_matrix<T: RealField>(a: &Array2<T>) -> Result<()> {
    match a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), _)) => Err(SolverError::NonFiniteInput { row, col }),
        None => Ok(()),
    }
}

/// Reject NaN or infinite vector entries (reported as column 0)
pub fn ensure_finite_vector<T: RealField>(v: &Array1<T>) -> Result<()> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(row) => Err(SolverError::NonFiniteInput { row, col: 0 }),
        None => Ok(()),
    }
}

/// Matrix-vector product y = A x
pub fn mat_vec<T: RealField>(a: &Array2<T>, x: &Array1<T>) -> Result<Array1<T>> {
    ensure_len(x, a.ncols())?;
    Ok(a.dot(x))
}

/// Matrix product C = A B
pub fn mat_mul<T: RealField>(a: &Array2<T>, b: &Array2<T>) -> Result<Array2<T>> {
    if a.ncols() != b.nrows() {
        return Err(SolverError::DimensionMismatch {
            expected: a.ncols(),
            got: b.nrows(),
        });
    }
    Ok(a.dot(b))
}

/// Pass `value` through if it is finite, otherwise report an overflow in
/// `context`
#[inline]
pub(crate) fn finite_or_overflow<T: RealField>(value: T, context: &'static str) -> Result<T> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NumericOverflow { context })
    }
}

/// n×n identity matrix
pub fn identity<T: RealField>(n: usize) -> Array2<T> {
    Array2::eye(n)
}

/// n×n Hilbert matrix, H[i][j] = 1 / (i + j + 1)
///
/// The classic badly conditioned test matrix.
pub fn hilbert<T: RealField>(n: usize) -> Array2<T> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        T::one() / T::from_f64_lossy((i + j + 1) as f64)
    })
}

/// All-ones vector of length n
pub fn ones<T: RealField>(n: usize) -> Array1<T> {
    Array1::from_elem(n, T::one())
}

/// Right-hand side b = A v for which `v` is the exact solution.
///
/// With `v` the all-ones vector this is the vector of row sums of A, which
/// pairs a system with the ones reference used by the residual metric.
pub fn consistent_rhs<T: RealField>(a: &Array2<T>, v: &Array1<T>) -> Result<Array1<T>> {
    ensure_square(a)?;
    mat_vec(a, v)
}
