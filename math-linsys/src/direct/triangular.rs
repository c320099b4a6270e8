//! Forward and backward substitution
//!
//! Solvers for triangular systems. Entries on the unused side of the diagonal
//! are never read, so a full matrix can be passed and only its lower (or
//! upper) triangle is used.
//!
//! A diagonal entry counts as zero relative to the largest entry of the used
//! triangle (see [`pivot_tolerance`]), and a component of x that overflows is
//! reported as [`SolverError::NumericOverflow`].

use crate::config::{DEFAULT_PIVOT_EPSILON, pivot_tolerance};
use crate::dense::{ensure_system, finite_or_overflow};
use crate::error::{Result, SolverError};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Solve Lx = b by forward substitution
///
/// x[i] = (b[i] - Σ_{j<i} L[i][j] x[j]) / L[i][i], for increasing i.
pub fn solve_lower_triangular<T: RealField>(l: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
    solve_lower_triangular_with_epsilon(l, b, DEFAULT_PIVOT_EPSILON)
}

/// Forward substitution with an explicit relative singularity threshold
pub fn solve_lower_triangular_with_epsilon<T: RealField>(
    l: &Array2<T>,
    b: &Array1<T>,
    epsilon: f64,
) -> Result<Array1<T>> {
    let n = ensure_system(l, b)?;
    let tol = pivot_tolerance(epsilon, triangle_max_abs(l, Triangle::Lower), n);
    let mut x = b.clone();

    for i in 0..n {
        for j in 0..i {
            let l_ij = l[[i, j]];
            x[i] = x[i] - l_ij * x[j];
        }
        x[i] = finite_or_overflow(x[i] / checked_diagonal(l, i, tol)?, "forward substitution")?;
    }

    Ok(x)
}

/// Solve Lx = b by forward substitution, treating the diagonal of L as ones
///
/// Used with the unit lower factor of an LU decomposition, so it never fails
/// on the diagonal.
pub fn solve_unit_lower_triangular<T: RealField>(
    l: &Array2<T>,
    b: &Array1<T>,
) -> Result<Array1<T>> {
    let n = ensure_system(l, b)?;
    let mut x = b.clone();

    for i in 0..n {
        for j in 0..i {
            let l_ij = l[[i, j]];
            x[i] = x[i] - l_ij * x[j];
        }
        finite_or_overflow(x[i], "forward substitution")?;
    }

    Ok(x)
}

/// Solve Ux = b by backward substitution
///
/// x[i] = (b[i] - Σ_{j>i} U[i][j] x[j]) / U[i][i], for i from n-1 down to 0.
pub fn solve_upper_triangular<T: RealField>(u: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
    solve_upper_triangular_with_epsilon(u, b, DEFAULT_PIVOT_EPSILON)
}

/// Backward substitution with an explicit relative singularity threshold
pub fn solve_upper_triangular_with_epsilon<T: RealField>(
    u: &Array2<T>,
    b: &Array1<T>,
    epsilon: f64,
) -> Result<Array1<T>> {
    let n = ensure_system(u, b)?;
    let tol = pivot_tolerance(epsilon, triangle_max_abs(u, Triangle::Upper), n);
    let mut x = b.clone();
    back_substitute(u, &mut x, n, tol)?;
    Ok(x)
}

/// In-place backward substitution on the leading n×n block of `u`.
///
/// `tol` is an absolute threshold already scaled to the matrix. Shared with
/// Gaussian elimination, whose working matrix carries the right-hand side as
/// an extra column, and with the LU factors.
pub(crate) fn back_substitute<T: RealField>(
    u: &Array2<T>,
    x: &mut Array1<T>,
    n: usize,
    tol: T,
) -> Result<()> {
    for i in (0..n).rev() {
        for j in (i + 1)..n {
            let u_ij = u[[i, j]];
            x[i] = x[i] - u_ij * x[j];
        }
        x[i] = finite_or_overflow(x[i] / checked_diagonal(u, i, tol)?, "backward substitution")?;
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Triangle {
    Lower,
    Upper,
}

/// Largest |entry| of one triangle, diagonal included
fn triangle_max_abs<T: RealField>(m: &Array2<T>, triangle: Triangle) -> T {
    m.indexed_iter()
        .filter(|((i, j), _)| match triangle {
            Triangle::Lower => j <= i,
            Triangle::Upper => j >= i,
        })
        .fold(T::zero(), |acc, (_, v)| acc.max(v.abs()))
}

#[inline]
fn checked_diagonal<T: RealField>(m: &Array2<T>, i: usize, tol: T) -> Result<T> {
    let d = m[[i, i]];
    if d.is_zero_approx(tol) {
        return Err(SolverError::SingularMatrix {
            index: i,
            value: d.to_f64_lossy(),
        });
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::mat_vec;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_lower_triangular() {
        let l = array![[2.0_f64, 0.0], [1.0, 3.0]];
        let b = array![4.0_f64, 11.0];

        let x = solve_lower_triangular(&l, &b).expect("Forward substitution should succeed");

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_upper_triangular() {
        let u = array![[3.0_f64, 1.0], [0.0, 2.0]];
        let b = array![11.0_f64, 6.0];

        let x = solve_upper_triangular(&u, &b).expect("Backward substitution should succeed");

        assert_relative_eq!(x[0], 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unused_triangle_is_ignored() {
        // The 99s sit in the triangle each solver must not read
        let full = array![[2.0_f64, 99.0], [1.0, 3.0]];
        let x = solve_lower_triangular(&full, &array![4.0, 11.0]).unwrap();
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);

        let full = array![[3.0_f64, 1.0], [99.0, 2.0]];
        let x = solve_upper_triangular(&full, &array![11.0, 6.0]).unwrap();
        assert_relative_eq!(x[0], 8.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reconstructs_rhs() {
        let l = array![
            [1.5_f64, 0.0, 0.0, 0.0],
            [-2.0, 4.0, 0.0, 0.0],
            [0.5, 1.0, -3.0, 0.0],
            [1.0, 2.0, 3.0, 4.0]
        ];
        let b = array![1.0_f64, -2.0, 3.5, 10.0];

        let x = solve_lower_triangular(&l, &b).unwrap();
        let lx = mat_vec(&l, &x).unwrap();
        for i in 0..4 {
            assert_relative_eq!(lx[i], b[i], epsilon = 1e-12);
        }

        let u = l.t().to_owned();
        let x = solve_upper_triangular(&u, &b).unwrap();
        let ux = mat_vec(&u, &x).unwrap();
        for i in 0..4 {
            assert_relative_eq!(ux[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let l = array![[1.0_f64, 0.0], [2.0, 0.0]];
        let result = solve_lower_triangular(&l, &array![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(SolverError::SingularMatrix { index: 1, .. })
        ));

        let u = array![[0.0_f64, 1.0], [0.0, 2.0]];
        let result = solve_upper_triangular(&u, &array![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(SolverError::SingularMatrix { index: 0, .. })
        ));
    }

    #[test]
    fn test_near_zero_diagonal_uses_epsilon() {
        let u = array![[1e-9_f64, 0.0], [0.0, 1.0]];
        let b = array![1.0_f64, 1.0];

        assert!(solve_upper_triangular(&u, &b).is_ok());
        assert!(solve_upper_triangular_with_epsilon(&u, &b, 1e-6).is_err());
    }

    #[test]
    fn test_threshold_is_relative_to_triangle() {
        // Same shape at two scales: both invertible, both accepted
        let u = array![[1e-9_f64, 1e-9], [0.0, 1e-9]];
        let x = solve_upper_triangular(&u, &array![2e-9, 1e-9]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);

        // A tiny diagonal next to a large entry is singular to working precision
        let l = array![[1e6_f64, 0.0], [1e6, 1e-8]];
        assert!(matches!(
            solve_lower_triangular(&l, &array![1.0, 1.0]),
            Err(SolverError::SingularMatrix { index: 1, .. })
        ));
    }

    #[test]
    fn test_overflowing_solution_is_an_error() {
        let m = array![[1e-10_f64]];
        let b = array![1e308_f64];

        assert!(matches!(
            solve_lower_triangular(&m, &b),
            Err(SolverError::NumericOverflow { .. })
        ));
        assert!(matches!(
            solve_upper_triangular(&m, &b),
            Err(SolverError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_unit_lower_ignores_diagonal() {
        let l = array![[5.0_f64, 0.0], [2.0, 0.0]];
        let x = solve_unit_lower_triangular(&l, &array![1.0, 4.0]).unwrap();
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 2.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let l = array![[1.0_f64, 0.0], [0.0, 1.0]];
        let result = solve_lower_triangular(&l, &array![1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(SolverError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_input_not_mutated() {
        let l = array![[2.0_f64, 0.0], [1.0, 3.0]];
        let b = array![4.0_f64, 11.0];
        let _ = solve_lower_triangular(&l, &b).unwrap();
        assert_eq!(b, array![4.0, 11.0]);
    }

    #[test]
    fn test_f32() {
        let l = array![[2.0_f32, 0.0], [1.0, 3.0]];
        let x = solve_lower_triangular(&l, &array![4.0_f32, 11.0]).unwrap();
        assert_relative_eq!(x[1], 3.0_f32, epsilon = 1e-6);
    }
}
