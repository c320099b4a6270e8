//! Direct solvers for dense linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`solve_lower_triangular`] / [`solve_upper_triangular`]: forward and backward substitution
//! - [`eliminate_and_solve`]: Gaussian elimination with partial pivoting
//! - [`factorize_lu`]: LU decomposition without pivoting, used by the condition estimate

mod elimination;
mod lu;
mod triangular;

pub use elimination::{
    GaussianElimination, Permutation, determinant, eliminate_and_solve, eliminate_with_permutation,
};
pub use lu::{LuFactors, factorize_lu, factorize_lu_with_epsilon};
pub use triangular::{
    solve_lower_triangular, solve_lower_triangular_with_epsilon, solve_unit_lower_triangular,
    solve_upper_triangular, solve_upper_triangular_with_epsilon,
};
