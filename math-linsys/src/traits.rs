//! Core traits for the dense solvers
//!
//! This module defines the abstractions shared by the direct solvers:
//! - [`RealField`]: Trait for the real scalar types a system can be solved in
//! - [`DirectSolver`]: Trait for solvers that return x for a square system Ax = b
//! - [`PermutedSolver`]: Extension of [`DirectSolver`] that also reports the row
//!   permutation applied while solving

use crate::direct::Permutation;
use crate::error::Result;
use ndarray::{Array1, Array2};
use num_traits::{Float, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display};

/// Trait for real scalar types that can be used by the dense solvers.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default, used by the orchestrated solve and the CLI)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Float + NumAssign + FromPrimitive + ToPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Convert an `f64` constant (tolerance, literal) into this type
    fn from_f64_lossy(value: f64) -> Self;

    /// Widen to `f64` for error reporting and logging
    fn to_f64_lossy(self) -> f64;

    /// Check if |self| is within `tol` of zero
    fn is_zero_approx(&self, tol: Self) -> bool {
        self.abs() <= tol
    }
}

impl RealField for f64 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}

impl RealField for f32 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self as f64
    }
}

/// Trait for direct (non-iterative) solvers of square dense systems.
///
/// Implementations must not mutate `a` or `b`: every call works on its own
/// copy so that repeated calls with the same inputs give the same answer.
pub trait DirectSolver<T: RealField>: Send + Sync {
    /// Solve Ax = b
    fn solve(&self, a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>>;
}

/// Direct solver that also exposes the row reordering it applied.
pub trait PermutedSolver<T: RealField>: DirectSolver<T> {
    /// Solve Ax = b and return x with the row permutation used by the pivoting
    fn solve_with_permutation(
        &self,
        a: &Array2<T>,
        b: &Array1<T>,
    ) -> Result<(Array1<T>, Permutation)>;
}
