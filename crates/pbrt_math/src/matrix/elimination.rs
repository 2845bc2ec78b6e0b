//! Elimination with partial pivoting for square matrices of any size.

use super::Matrix;
use crate::{
    num::Float,
    storage::{LaneCount, SupportedLaneCount},
};

/// Swaps rows so that the entry of largest magnitude in column `col` at or
/// below the diagonal lands on the diagonal. Returns the row it came from, or
/// [`None`] if every candidate is smaller than
/// [`PRECISION_EPSILON`](crate::Scalar::PRECISION_EPSILON).
fn pivot<F: Float, const N: usize>(a: &Matrix<F, N, N>, col: usize) -> Option<usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    let (pivot_row, max_value) = (col..N)
        .map(|row| (row, a.at(row, col).abs()))
        .fold((col, F::ZERO), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        });
    (max_value >= F::PRECISION_EPSILON).then_some(pivot_row)
}

/// Computes the determinant by reducing to upper triangular form, tracking
/// the sign flip of every row swap. A column without a usable pivot gives
/// exactly zero.
pub(super) fn determinant<F: Float, const N: usize>(matrix: &Matrix<F, N, N>) -> F
where
    LaneCount<N>: SupportedLaneCount,
{
    let mut a = *matrix;
    let mut det = F::ONE;

    for col in 0..N {
        let Some(pivot_row) = pivot(&a, col) else {
            return F::ZERO;
        };
        if pivot_row != col {
            a.swap_rows(pivot_row, col);
            det = -det;
        }

        let pivot_value = a.at(col, col);
        det = det * pivot_value;

        let pivot_row = *a.row(col);
        for row in (col + 1)..N {
            let factor = a.at(row, col) / pivot_value;
            *a.row_mut(row) -= pivot_row * factor;
        }
    }
    det
}

/// Computes the inverse by Gauss-Jordan elimination on the matrix and an
/// identity matrix side by side. Returns [`None`] if the matrix is singular.
pub(super) fn inverse<F: Float, const N: usize>(matrix: &Matrix<F, N, N>) -> Option<Matrix<F, N, N>>
where
    LaneCount<N>: SupportedLaneCount,
{
    let mut a = *matrix;
    let mut inv = Matrix::identity();

    for col in 0..N {
        let pivot_row = pivot(&a, col)?;
        if pivot_row != col {
            a.swap_rows(pivot_row, col);
            inv.swap_rows(pivot_row, col);
        }

        let inv_pivot = a.at(col, col).recip();
        *a.row_mut(col) *= inv_pivot;
        *inv.row_mut(col) *= inv_pivot;

        let (a_pivot_row, inv_pivot_row) = (*a.row(col), *inv.row(col));
        for row in (0..N).filter(|&row| row != col) {
            let factor = a.at(row, col);
            if factor != F::ZERO {
                *a.row_mut(row) -= a_pivot_row * factor;
                *inv.row_mut(row) -= inv_pivot_row * factor;
            }
        }
    }
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn determinant_needing_row_swap_has_correct_sign() {
        let m = Matrix::<f64, 3, 3>::from_row_arrays([
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);
        assert_abs_diff_eq!(determinant(&m), -2.0);
    }

    #[test]
    fn determinant_of_matrix_with_zero_column_is_zero() {
        let m = Matrix::<f32, 3, 3>::from_row_arrays([
            [0.0, 1.0, 2.0],
            [0.0, 3.0, 4.0],
            [0.0, 5.0, 6.0],
        ]);
        assert_eq!(determinant(&m), 0.0);
    }

    #[test]
    fn elimination_inverse_of_diagonal_matrix_inverts_diagonal() {
        let m = Matrix::<f64, 3, 3>::from_row_arrays([
            [2.0, 0.0, 0.0],
            [0.0, 4.0, 0.0],
            [0.0, 0.0, -0.5],
        ]);
        let inv = inverse(&m).unwrap();
        assert_abs_diff_eq!(
            inv,
            Matrix::from_row_arrays([[0.5, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, -2.0]])
        );
    }

    #[test]
    fn elimination_inverse_of_singular_matrix_is_none() {
        let m = Matrix::<f64, 3, 3>::from_row_arrays([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [0.0, 1.0, 1.0],
        ]);
        assert!(inverse(&m).is_none());
    }
}
