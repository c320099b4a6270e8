//! LU decomposition without pivoting
//!
//! Doolittle factorization A = LU with L unit lower triangular. No rows are
//! exchanged, so the factorization breaks down on matrices with a singular
//! leading principal submatrix even when A itself is invertible; use
//! [`eliminate_and_solve`](super::eliminate_and_solve) for actual solves.

use super::triangular::{back_substitute, solve_unit_lower_triangular};
use crate::config::{DEFAULT_PIVOT_EPSILON, pivot_tolerance};
use crate::dense::{ensure_finite_matrix, ensure_len, ensure_square};
use crate::error::{Result, SolverError};
use crate::norms::max_abs_entry;
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// LU factorization result
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors<T: RealField> {
    /// Unit lower triangular factor
    pub l: Array2<T>,
    /// Upper triangular factor
    pub u: Array2<T>,
    /// Matrix dimension
    pub n: usize,
    /// Absolute threshold the diagonal of U was checked against
    tol: T,
}

impl<T: RealField> LuFactors<T> {
    /// Solve Ax = b using the pre-computed factors (Ly = b, then Ux = y)
    pub fn solve(&self, b: &Array1<T>) -> Result<Array1<T>> {
        ensure_len(b, self.n)?;
        let mut x = solve_unit_lower_triangular(&self.l, b)?;
        back_substitute(&self.u, &mut x, self.n, self.tol)?;
        Ok(x)
    }

    /// Recompute L·U
    pub fn reconstruct(&self) -> Array2<T> {
        self.l.dot(&self.u)
    }

    /// Product of the diagonal of U, which is det(A) since L has a unit diagonal
    pub fn determinant(&self) -> T {
        (0..self.n).fold(T::one(), |acc, i| acc * self.u[[i, i]])
    }
}

/// Compute the LU factorization of A without pivoting
pub fn factorize_lu<T: RealField>(a: &Array2<T>) -> Result<LuFactors<T>> {
    factorize_lu_with_epsilon(a, DEFAULT_PIVOT_EPSILON)
}

/// LU factorization with an explicit singularity threshold for the diagonal of U
///
/// U[i][i] counts as zero when it is within `epsilon · max|A|` of zero.
///
/// U[i][j] = A[i][j] - Σ_{k<i} L[i][k] U[k][j]            (j >= i)
/// L[j][i] = (A[j][i] - Σ_{k<i} L[j][k] U[k][i]) / U[i][i]  (j > i)
pub fn factorize_lu_with_epsilon<T: RealField>(
    a: &Array2<T>,
    epsilon: f64,
) -> Result<LuFactors<T>> {
    let n = ensure_square(a)?;
    ensure_finite_matrix(a)?;
    let tol = pivot_tolerance(epsilon, max_abs_entry(a), n);

    let mut l: Array2<T> = Array2::eye(n);
    let mut u: Array2<T> = Array2::zeros((n, n));

    for i in 0..n {
        for j in i..n {
            let mut sum = T::zero();
            for k in 0..i {
                sum += l[[i, k]] * u[[k, j]];
            }
            u[[i, j]] = a[[i, j]] - sum;
        }

        let u_ii = u[[i, i]];
        if u_ii.is_zero_approx(tol) {
            return Err(SolverError::SingularMatrix {
                index: i,
                value: u_ii.to_f64_lossy(),
            });
        }

        for j in (i + 1)..n {
            let mut sum = T::zero();
            for k in 0..i {
                sum += l[[j, k]] * u[[k, i]];
            }
            l[[j, i]] = (a[[j, i]] - sum) / u_ii;
        }
    }

    if l.iter().chain(u.iter()).any(|v| !v.is_finite()) {
        return Err(SolverError::NumericOverflow {
            context: "LU factorization",
        });
    }

    Ok(LuFactors { l, u, n, tol })
}
