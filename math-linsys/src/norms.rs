//! Vector and matrix norms
//!
//! Vector helpers (inner products, 2-norms, ∞-norms) and the matrix norms
//! available to the condition estimate.
//!
//! # Row sum-of-squares norm
//!
//! The default matrix norm, [`MatrixNorm::RowSumOfSquares`], is
//! `sqrt(max_r Σ_j M[r][j]^2)`: the Euclidean length of the longest row. It is
//! not an induced norm and is not sub-multiplicative in general, so the
//! product `‖A‖·‖A⁻¹‖` computed with it is a proxy for the condition number
//! rather than a classical one. It is kept as the default so that estimates
//! stay comparable with the Hilbert demonstration tables; the textbook norms
//! are available for comparison.

use crate::traits::RealField;
use ndarray::{Array1, Array2, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

/// Matrix norm used by the condition estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixNorm {
    /// sqrt of the largest row sum of squares (the proxy norm)
    #[default]
    #[serde(alias = "proxy")]
    RowSumOfSquares,
    /// sqrt of the sum of all squared entries
    Frobenius,
    /// Largest absolute row sum (induced ∞-norm)
    Infinity,
    /// Largest absolute column sum (induced 1-norm)
    One,
}

impl MatrixNorm {
    /// Short label used in logs and CLI output
    pub fn name(&self) -> &'static str {
        match self {
            MatrixNorm::RowSumOfSquares => "row-sum-of-squares",
            MatrixNorm::Frobenius => "frobenius",
            MatrixNorm::Infinity => "infinity",
            MatrixNorm::One => "one",
        }
    }

    /// Evaluate this norm on `m`
    pub fn apply<T: RealField>(&self, m: &Array2<T>) -> T {
        match self {
            MatrixNorm::RowSumOfSquares => row_sum_of_squares_norm(m),
            MatrixNorm::Frobenius => frobenius_norm(m),
            MatrixNorm::Infinity => infinity_norm(m),
            MatrixNorm::One => one_norm(m),
        }
    }
}

/// Compute inner product (x, y) = Σ x_i * y_i
///
/// Callers are responsible for passing vectors of equal length.
#[inline]
pub fn inner_product<T: RealField>(x: &Array1<T>, y: &Array1<T>) -> T {
    debug_assert_eq!(x.len(), y.len(), "Vector lengths must match for inner product");
    let mut sum = T::zero();
    for (xi, yi) in x.iter().zip(y.iter()) {
        sum += *xi * *yi;
    }
    sum
}

/// Compute vector 2-norm: ||x||_2 = sqrt(Σ x_i^2)
#[inline]
pub fn vector_norm<T: RealField>(x: &Array1<T>) -> T {
    scaled_euclidean(x)
}

/// Compute vector norm squared: ||x||_2^2 = Σ x_i^2
#[inline]
pub fn vector_norm_sqr<T: RealField>(x: &Array1<T>) -> T {
    let mut sum = T::zero();
    for xi in x.iter() {
        sum += *xi * *xi;
    }
    sum
}

/// Compute vector ∞-norm: max_i |x_i| (zero for an empty vector)
#[inline]
pub fn vector_max_abs<T: RealField>(x: &Array1<T>) -> T {
    x.iter().fold(T::zero(), |acc, xi| acc.max(xi.abs()))
}

/// Largest absolute entry of a matrix (zero for an empty matrix)
pub fn max_abs_entry<T: RealField>(m: &Array2<T>) -> T {
    m.iter().fold(T::zero(), |acc, v| acc.max(v.abs()))
}

/// sqrt(Σ v^2), with every entry divided by the largest |v| before squaring
/// so that the squares neither overflow nor underflow
fn scaled_euclidean<T, S, D>(values: &ArrayBase<S, D>) -> T
where
    T: RealField,
    S: Data<Elem = T>,
    D: Dimension,
{
    let scale = values.iter().fold(T::zero(), |acc, v| acc.max(v.abs()));
    if scale == T::zero() || !scale.is_finite() {
        return scale;
    }
    let sum = values.iter().fold(T::zero(), |acc, v| {
        let r = *v / scale;
        acc + r * r
    });
    scale * sum.sqrt()
}

/// Largest Euclidean row length, sqrt(max_r Σ_j m[r][j]^2)
pub fn row_sum_of_squares_norm<T: RealField>(m: &Array2<T>) -> T {
    m.rows()
        .into_iter()
        .map(|row| scaled_euclidean(&row))
        .fold(T::zero(), |acc, len| acc.max(len))
}

/// Frobenius norm, sqrt(Σ_ij m[i][j]^2)
pub fn frobenius_norm<T: RealField>(m: &Array2<T>) -> T {
    scaled_euclidean(m)
}

/// Induced ∞-norm, max_r Σ_j |m[r][j]|
pub fn infinity_norm<T: RealField>(m: &Array2<T>) -> T {
    m.rows()
        .into_iter()
        .map(|row| row.iter().fold(T::zero(), |acc, v| acc + v.abs()))
        .fold(T::zero(), |acc, s| acc.max(s))
}

/// Induced 1-norm, max_c Σ_i |m[i][c]|
pub fn one_norm<T: RealField>(m: &Array2<T>) -> T {
    m.columns()
        .into_iter()
        .map(|col| col.iter().fold(T::zero(), |acc, v| acc + v.abs()))
        .fold(T::zero(), |acc, s| acc.max(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_vector_norms() {
        let x = array![3.0_f64, -4.0];
        assert_relative_eq!(vector_norm(&x), 5.0);
        assert_relative_eq!(vector_norm_sqr(&x), 25.0);
        assert_relative_eq!(vector_max_abs(&x), 4.0);
        assert_relative_eq!(inner_product(&x, &array![1.0, 1.0]), -1.0);
    }

    #[test]
    fn test_row_sum_of_squares_is_longest_row() {
        let m = array![[1.0_f64, 2.0], [3.0, 4.0]];
        // rows: 1 + 4 = 5, 9 + 16 = 25
        assert_relative_eq!(row_sum_of_squares_norm(&m), 5.0);
    }

    #[test]
    fn test_textbook_norms() {
        let m = array![[1.0_f64, -2.0], [3.0, 4.0]];
        assert_relative_eq!(frobenius_norm(&m), 30.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(infinity_norm(&m), 7.0);
        assert_relative_eq!(one_norm(&m), 6.0);
    }

    #[test]
    fn test_proxy_differs_from_frobenius() {
        let m = array![[1.0_f64, 1.0], [1.0, 1.0]];
        assert_relative_eq!(MatrixNorm::RowSumOfSquares.apply(&m), 2.0_f64.sqrt());
        assert_relative_eq!(MatrixNorm::Frobenius.apply(&m), 2.0);
    }

    #[test]
    fn test_identity_is_one_for_every_norm() {
        let id: Array2<f64> = Array2::eye(4);
        for norm in [MatrixNorm::RowSumOfSquares, MatrixNorm::Infinity, MatrixNorm::One] {
            assert_relative_eq!(norm.apply(&id), 1.0);
        }
        assert_relative_eq!(MatrixNorm::Frobenius.apply(&id), 2.0);
    }

    #[test]
    fn test_large_entries_do_not_overflow() {
        let m = array![[1e200_f64, 0.0], [0.0, 1.0]];
        assert_relative_eq!(row_sum_of_squares_norm(&m), 1e200, max_relative = 1e-15);
        assert_relative_eq!(frobenius_norm(&m), 1e200, max_relative = 1e-15);

        let x = array![3e200_f64, -4e200];
        assert_relative_eq!(vector_norm(&x), 5e200, max_relative = 1e-15);
    }

    #[test]
    fn test_tiny_entries_do_not_underflow() {
        let x = array![3e-200_f64, 4e-200];
        assert_relative_eq!(vector_norm(&x), 5e-200, max_relative = 1e-15);
        assert_eq!(vector_norm(&Array1::<f64>::zeros(3)), 0.0);
    }

    #[test]
    fn test_max_abs_entry() {
        assert_eq!(max_abs_entry(&array![[1.0_f64, -7.0], [3.0, 2.0]]), 7.0);
        assert_eq!(max_abs_entry(&Array2::<f64>::zeros((0, 0))), 0.0);
    }

    #[test]
    fn test_norm_serde_names() {
        let norm: MatrixNorm = serde_json::from_str("\"proxy\"").unwrap();
        assert_eq!(norm, MatrixNorm::RowSumOfSquares);
        assert_eq!(
            serde_json::to_string(&MatrixNorm::Infinity).unwrap(),
            "\"infinity\""
        );
    }
}
