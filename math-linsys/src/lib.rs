//! Dense direct linear solvers with conditioning diagnostics
//!
//! This crate solves small dense systems Ax = b with direct methods and
//! reports how far the answer can be trusted.
//!
//! # Features
//!
//! - **Triangular solvers**: forward and backward substitution
//! - **Gaussian elimination**: partial pivoting, optionally reporting the row permutation
//! - **LU decomposition**: unpivoted Doolittle factors, used to build an approximate inverse
//! - **Condition estimate**: `‖A‖·‖A⁻¹‖` under a row sum-of-squares proxy norm or a textbook norm
//! - **Residual metric**: distance between a computed solution and a reference solution
//! - **Generic Scalar Types**: Works with f64 and f32
//!
//! Every operation borrows its inputs. Pivots that are zero relative to the
//! size of the matrix are reported as [`SolverError::SingularMatrix`], and
//! results that would not be finite as [`SolverError::NumericOverflow`], so a
//! successful call never returns NaN or infinity.
//!
//! # Example
//!
//! ```
//! use math_audio_linsys::{orchestrate_solve, dense};
//! use ndarray::array;
//!
//! let a = array![[4.0_f64, 3.0], [6.0, 3.0]];
//! let b = array![10.0_f64, 12.0];
//!
//! let result = orchestrate_solve(&a, &b, &dense::ones(2)).unwrap();
//! assert!((result.x[0] - 1.0).abs() < 1e-12);
//! assert!((result.x[1] - 2.0).abs() < 1e-12);
//! ```

pub mod conditioning;
pub mod config;
pub mod dense;
pub mod direct;
pub mod error;
pub mod norms;
pub mod orchestrator;
pub mod residual;
pub mod system;
pub mod traits;

// Re-export main types
pub use config::{DEFAULT_PIVOT_EPSILON, SolverConfig, pivot_tolerance};
pub use error::{ConfigError, Result, SolverError};
pub use norms::MatrixNorm;
pub use system::{LinearSystem, SystemArrays};
pub use traits::{DirectSolver, PermutedSolver, RealField};

// Re-export direct solvers
pub use direct::{
    GaussianElimination, LuFactors, Permutation, determinant, eliminate_and_solve,
    eliminate_with_permutation, factorize_lu, solve_lower_triangular, solve_upper_triangular,
};

// Re-export diagnostics
pub use conditioning::{approximate_inverse, estimate_condition, estimate_condition_with};
pub use orchestrator::{DenseSystemSolver, SolveResult, orchestrate_solve};
pub use residual::{backward_error, residual};
