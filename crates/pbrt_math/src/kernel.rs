//! Lane kernels shared by vectors, matrices and quaternions.

use crate::{
    num::{self, Scalar},
    simd::{LaneKernel, Register},
};
use std::{array, ops::Neg};

/// Element-wise binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    SafeDiv,
    Min,
    Max,
}

/// Combines two lane arrays element by element.
#[derive(Debug)]
pub(crate) struct Zip<'a, T, const N: usize> {
    pub lhs: &'a [T; N],
    pub rhs: &'a [T; N],
    pub op: BinaryOp,
}

/// Sum of the element-wise products of two lane arrays, accumulated in lane
/// order.
#[derive(Debug)]
pub(crate) struct Dot<'a, T, const N: usize> {
    pub lhs: &'a [T; N],
    pub rhs: &'a [T; N],
}

/// Exact equality of all lanes.
#[derive(Debug)]
pub(crate) struct Equal<'a, T, const N: usize> {
    pub lhs: &'a [T; N],
    pub rhs: &'a [T; N],
}

/// Whether no pair of lanes differs by more than `epsilon`.
#[derive(Debug)]
pub(crate) struct Within<'a, T, const N: usize> {
    pub lhs: &'a [T; N],
    pub rhs: &'a [T; N],
    pub epsilon: T,
}

#[derive(Debug)]
pub(crate) struct Abs<'a, T, const N: usize> {
    pub lanes: &'a [T; N],
}

#[derive(Debug)]
pub(crate) struct Negate<'a, T, const N: usize> {
    pub lanes: &'a [T; N],
}

/// Weighted sum `sum_k weights[k] * rows[k]`, accumulated in row order.
#[derive(Debug)]
pub(crate) struct WeightedSum<'a, T, const N: usize> {
    pub weights: &'a [T],
    pub rows: &'a [[T; N]],
}

impl BinaryOp {
    #[inline]
    fn apply<T: Scalar>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::SafeDiv => num::safe_divide(a, b),
            Self::Min => num::partial_min(a, b),
            Self::Max => num::partial_max(a, b),
        }
    }

    #[inline]
    fn apply_register<R: Register>(self, a: R, b: R) -> R {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::SafeDiv => a.safe_div(b),
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }
}

#[inline]
fn stored<R: Register, const N: usize>(register: R) -> [R::Scalar; N] {
    let mut lanes = [R::Scalar::ZERO; N];
    register.store(&mut lanes);
    lanes
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for Zip<'_, T, N> {
    type Output = [T; N];

    #[inline]
    fn scalar(self) -> [T; N] {
        array::from_fn(|idx| self.op.apply(self.lhs[idx], self.rhs[idx]))
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> [T; N] {
        stored(
            self.op
                .apply_register(R::load(self.lhs), R::load(self.rhs)),
        )
    }
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for Dot<'_, T, N> {
    type Output = T;

    #[inline]
    fn scalar(self) -> T {
        self.lhs
            .iter()
            .zip(self.rhs)
            .fold(T::ZERO, |acc, (&a, &b)| acc + a * b)
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> T {
        (R::load(self.lhs) * R::load(self.rhs)).sum()
    }
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for Equal<'_, T, N> {
    type Output = bool;

    #[inline]
    fn scalar(self) -> bool {
        self.lhs == self.rhs
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> bool {
        R::load(self.lhs).all_eq(R::load(self.rhs))
    }
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for Within<'_, T, N> {
    type Output = bool;

    #[inline]
    fn scalar(self) -> bool {
        !self
            .lhs
            .iter()
            .zip(self.rhs)
            .any(|(&a, &b)| a.abs_diff(b) > self.epsilon)
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> bool {
        R::load(self.lhs).all_within(R::load(self.rhs), self.epsilon)
    }
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for Abs<'_, T, N> {
    type Output = [T; N];

    #[inline]
    fn scalar(self) -> [T; N] {
        self.lanes.map(T::scalar_abs)
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> [T; N] {
        stored(R::load(self.lanes).abs())
    }
}

impl<T: Scalar + Neg<Output = T>, const N: usize> LaneKernel<T, N> for Negate<'_, T, N> {
    type Output = [T; N];

    #[inline]
    fn scalar(self) -> [T; N] {
        self.lanes.map(T::neg)
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> [T; N] {
        stored(-R::load(self.lanes))
    }
}

impl<T: Scalar, const N: usize> LaneKernel<T, N> for WeightedSum<'_, T, N> {
    type Output = [T; N];

    #[inline]
    fn scalar(self) -> [T; N] {
        let mut sum = [T::ZERO; N];
        for (&weight, row) in self.weights.iter().zip(self.rows) {
            for (acc, &value) in sum.iter_mut().zip(row) {
                *acc = *acc + weight * value;
            }
        }
        sum
    }

    #[inline]
    fn register<R: Register<Scalar = T>>(self) -> [T; N] {
        let sum = self
            .weights
            .iter()
            .zip(self.rows)
            .fold(R::splat(T::ZERO), |acc, (&weight, row)| {
                acc + R::splat(weight) * R::load(row)
            });
        stored(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::{f32x4, f64x4};

    #[test]
    fn zip_gives_same_result_on_both_paths() {
        let a = [1.0_f32, -2.0, 3.5, 0.0];
        let b = [2.0_f32, 0.0, -1.0, 4.0];
        for op in [
            BinaryOp::Add,
            BinaryOp::Sub,
            BinaryOp::Mul,
            BinaryOp::SafeDiv,
            BinaryOp::Min,
            BinaryOp::Max,
        ] {
            let kernel = || Zip {
                lhs: &a,
                rhs: &b,
                op,
            };
            assert_eq!(kernel().scalar(), kernel().register::<f32x4>(), "{op:?}");
        }
    }

    #[test]
    fn safe_division_by_zero_lane_gives_zero() {
        let a = [1.0_f64, 2.0, 3.0, 4.0];
        let b = [0.0_f64, 2.0, 0.0, -4.0];
        let expected = [0.0, 1.0, 0.0, -1.0];
        let kernel = || Zip {
            lhs: &a,
            rhs: &b,
            op: BinaryOp::SafeDiv,
        };
        assert_eq!(kernel().scalar(), expected);
        assert_eq!(kernel().register::<f64x4>(), expected);
    }

    #[test]
    fn weighted_sum_gives_same_result_on_both_paths() {
        let weights = [1.0_f32, 2.0, -0.5, 3.0];
        let rows = [
            [1.0_f32, 2.0, 3.0, 4.0],
            [0.5, 0.25, 0.0, -1.0],
            [8.0, 6.0, 4.0, 2.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        let kernel = || WeightedSum {
            weights: &weights,
            rows: &rows,
        };
        assert_eq!(kernel().scalar(), kernel().register::<f32x4>());
        assert_eq!(kernel().scalar(), [1.0, 2.5, 4.0, 4.0]);
    }

    #[test]
    fn within_rejects_lanes_beyond_epsilon() {
        let a = [1_i32, 5, 9];
        let b = [2_i32, 5, 9];
        assert!(
            Within {
                lhs: &a,
                rhs: &b,
                epsilon: 1
            }
            .scalar()
        );
        assert!(
            !Within {
                lhs: &a,
                rhs: &b,
                epsilon: 0
            }
            .scalar()
        );
    }
}
