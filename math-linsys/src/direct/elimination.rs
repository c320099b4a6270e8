//! Gaussian elimination with partial pivoting
//!
//! One elimination routine serves both call shapes: [`eliminate_and_solve`]
//! returns only x, [`eliminate_with_permutation`] also returns the row
//! permutation chosen by the pivoting.
//!
//! A pivot is zero when it is within `epsilon · max|A|` of zero (see
//! [`pivot_tolerance`]), so a matrix with one row a multiple of another is
//! singular whatever the magnitude of its entries.

use super::triangular::back_substitute;
use crate::config::{DEFAULT_PIVOT_EPSILON, pivot_tolerance};
use crate::dense::{ensure_system, finite_or_overflow};
use crate::error::{Result, SolverError};
use crate::norms::max_abs_entry;
use crate::traits::{DirectSolver, PermutedSolver, RealField};
use ndarray::{Array1, Array2};

/// Row permutation applied during elimination.
///
/// `permutation[i]` is the index of the original row that ended up at
/// position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
    swaps: usize,
}

impl Permutation {
    /// Identity permutation of length n
    pub fn identity(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            swaps: 0,
        }
    }

    /// Exchange positions i and j
    pub fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.indices.swap(i, j);
            self.swaps += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }

    /// True if no rows were moved
    pub fn is_identity(&self) -> bool {
        self.indices.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// +1 for an even number of row exchanges, -1 for an odd number
    pub fn sign(&self) -> i32 {
        if self.swaps % 2 == 0 { 1 } else { -1 }
    }

    /// Reorder `v` into eliminated row order: `out[i] = v[permutation[i]]`
    pub fn apply<T: RealField>(&self, v: &Array1<T>) -> Result<Array1<T>> {
        self.check_len(v.len())?;
        Ok(self.indices.iter().map(|&p| v[p]).collect())
    }

    /// Scatter `v` back to original row order: `out[permutation[i]] = v[i]`
    pub fn unpermute<T: RealField>(&self, v: &Array1<T>) -> Result<Array1<T>> {
        self.check_len(v.len())?;
        let mut out = Array1::zeros(v.len());
        for (i, &p) in self.indices.iter().enumerate() {
            out[p] = v[i];
        }
        Ok(out)
    }

    fn check_len(&self, got: usize) -> Result<()> {
        if got != self.indices.len() {
            return Err(SolverError::DimensionMismatch {
                expected: self.indices.len(),
                got,
            });
        }
        Ok(())
    }
}

/// Augmented system after forward elimination
struct Eliminated<T: RealField> {
    /// n×(n+1): upper-triangular coefficients plus the transformed right-hand side
    augmented: Array2<T>,
    permutation: Permutation,
    n: usize,
    /// Absolute pivot threshold for this matrix
    tol: T,
}

impl<T: RealField> Eliminated<T> {
    fn back_substitute(&self) -> Result<Array1<T>> {
        let mut x = self.augmented.column(self.n).to_owned();
        back_substitute(&self.augmented, &mut x, self.n, self.tol)?;
        Ok(x)
    }

    fn pivot_product(&self) -> T {
        (0..self.n).fold(T::one(), |acc, i| acc * self.augmented[[i, i]])
    }
}

/// Forward elimination of [A|b] with partial pivoting.
///
/// Works on a copy; `a` and `b` are left untouched.
fn eliminate<T: RealField>(a: &Array2<T>, b: &Array1<T>, epsilon: f64) -> Result<Eliminated<T>> {
    let n = ensure_system(a, b)?;
    let tol = pivot_tolerance(epsilon, max_abs_entry(a), n);

    let mut augmented: Array2<T> = Array2::zeros((n, n + 1));
    augmented.slice_mut(ndarray::s![.., ..n]).assign(a);
    augmented.column_mut(n).assign(b);
    let mut permutation = Permutation::identity(n);

    for i in 0..n {
        // Largest |value| in column i; strict comparison keeps the first row on ties
        let mut max_val = augmented[[i, i]].abs();
        let mut max_row = i;
        for j in (i + 1)..n {
            let val = augmented[[j, i]].abs();
            if val > max_val {
                max_val = val;
                max_row = j;
            }
        }

        finite_or_overflow(max_val, "elimination")?;
        if max_val <= tol {
            return Err(SolverError::SingularMatrix {
                index: i,
                value: augmented[[max_row, i]].to_f64_lossy(),
            });
        }

        if max_row != i {
            log::trace!("Elimination stage {}: swapping rows {} and {}", i, i, max_row);
            for k in 0..=n {
                augmented.swap([i, k], [max_row, k]);
            }
            permutation.swap(i, max_row);
        }

        let pivot = augmented[[i, i]];
        for j in (i + 1)..n {
            let ratio = augmented[[j, i]] / pivot;
            for k in i..=n {
                let update = ratio * augmented[[i, k]];
                augmented[[j, k]] -= update;
            }
        }
    }

    Ok(Eliminated {
        augmented,
        permutation,
        n,
        tol,
    })
}

/// Gaussian elimination with partial pivoting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianElimination {
    /// Relative pivot threshold: pivots with |value| <= epsilon · max|A| are
    /// treated as zero
    pub epsilon: f64,
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_PIVOT_EPSILON,
        }
    }
}

impl GaussianElimination {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Determinant of A from the pivots and the permutation sign.
    ///
    /// A matrix whose elimination meets a pivot within epsilon of zero has
    /// determinant zero; only shape and non-finite errors are reported.
    pub fn determinant<T: RealField>(&self, a: &Array2<T>) -> Result<T> {
        let rhs: Array1<T> = Array1::zeros(a.nrows());
        match eliminate(a, &rhs, self.epsilon) {
            Ok(eliminated) => {
                let det = finite_or_overflow(eliminated.pivot_product(), "determinant")?;
                Ok(if eliminated.permutation.sign() < 0 {
                    -det
                } else {
                    det
                })
            }
            Err(SolverError::SingularMatrix { .. }) => Ok(T::zero()),
            Err(e) => Err(e),
        }
    }
}

impl<T: RealField> DirectSolver<T> for GaussianElimination {
    fn solve(&self, a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
        self.solve_with_permutation(a, b).map(|(x, _)| x)
    }
}

impl<T: RealField> PermutedSolver<T> for GaussianElimination {
    fn solve_with_permutation(
        &self,
        a: &Array2<T>,
        b: &Array1<T>,
    ) -> Result<(Array1<T>, Permutation)> {
        let eliminated = eliminate(a, b, self.epsilon)?;
        // b travelled through the same row swaps as A, and row swaps never
        // reorder the unknowns, so x is already in original variable order.
        let x = eliminated.back_substitute()?;
        Ok((x, eliminated.permutation))
    }
}

/// Solve Ax = b by Gaussian elimination with partial pivoting
pub fn eliminate_and_solve<T: RealField>(a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
    GaussianElimination::default().solve(a, b)
}

/// Solve Ax = b and return the row permutation chosen by partial pivoting
pub fn eliminate_with_permutation<T: RealField>(
    a: &Array2<T>,
    b: &Array1<T>,
) -> Result<(Array1<T>, Permutation)> {
    GaussianElimination::default().solve_with_permutation(a, b)
}

/// Determinant of a square matrix via partial-pivoting elimination
pub fn determinant<T: RealField>(a: &Array2<T>) -> Result<T> {
    GaussianElimination::default().determinant(a)
}
