//! Selection of hardware vector registers for fixed-width lane arrays.
//!
//! A (scalar type, lane count) pair is eligible for a register when the pair
//! is one of `f32 x 4`, `f32 x 8`, `f64 x 2` or `f64 x 4`. Every other pair
//! runs the scalar loop. The choice is made during monomorphization: an
//! operation is written once as a [`LaneKernel`] with a scalar and a
//! register implementation, and [`Scalar::execute`] picks one of them.

use crate::num::Scalar;
use std::ops::{Add, Div, Mul, Neg, Sub};
use wide::{CmpEq, CmpGt, f32x4, f32x8, f64x2, f64x4};

/// A hardware vector register holding [`LANES`](Self::LANES) scalars.
pub trait Register:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    type Scalar: Scalar;

    const LANES: usize;

    /// Creates a register with every lane set to `value`.
    fn splat(value: Self::Scalar) -> Self;

    /// Loads the first [`LANES`](Self::LANES) values of `lanes`.
    fn load(lanes: &[Self::Scalar]) -> Self;

    /// Stores the register into the first [`LANES`](Self::LANES) values of
    /// `lanes`.
    fn store(self, lanes: &mut [Self::Scalar]);

    fn abs(self) -> Self;

    fn min(self, other: Self) -> Self;

    fn max(self, other: Self) -> Self;

    /// Sum of all lanes.
    fn sum(self) -> Self::Scalar;

    /// Lane-wise division giving zero in every lane where `divisor` is zero.
    fn safe_div(self, divisor: Self) -> Self;

    /// Whether every lane equals the corresponding lane of `other`.
    fn all_eq(self, other: Self) -> bool;

    /// Whether no lane differs from the corresponding lane of `other` by
    /// more than `epsilon`.
    fn all_within(self, other: Self, epsilon: Self::Scalar) -> bool;
}

/// An operation on one or more `[T; N]` lane arrays that can run either as
/// a plain scalar loop or on a hardware register with `N` lanes.
///
/// Both implementations must give the same result (up to rounding for
/// reductions).
pub trait LaneKernel<T: Scalar, const N: usize> {
    type Output;

    /// Runs the operation as a loop over the lanes.
    fn scalar(self) -> Self::Output;

    /// Runs the operation on the register type `R`. Only called when
    /// `R::LANES == N`.
    fn register<R: Register<Scalar = T>>(self) -> Self::Output;
}

/// Whether there is a hardware register for `lanes` values of type `T`.
pub const fn has_register<T: Scalar>(lanes: usize) -> bool {
    let supported = T::REGISTER_LANES;
    let mut idx = 0;
    while idx < supported.len() {
        if supported[idx] == lanes {
            return true;
        }
        idx += 1;
    }
    false
}

/// Alignment in bytes required by the register for `lanes` values of type
/// `T`, or the natural alignment of `T` when there is no register.
pub const fn register_alignment<T: Scalar>(lanes: usize) -> usize {
    if has_register::<T>(lanes) {
        lanes * size_of::<T>()
    } else {
        align_of::<T>()
    }
}

/// Runs `kernel` for `f32` lanes, on a register when `N` is 4 or 8.
#[inline]
pub fn execute_f32<const N: usize, K: LaneKernel<f32, N>>(kernel: K) -> K::Output {
    match N {
        4 => kernel.register::<f32x4>(),
        8 => kernel.register::<f32x8>(),
        _ => kernel.scalar(),
    }
}

/// Runs `kernel` for `f64` lanes, on a register when `N` is 2 or 4.
#[inline]
pub fn execute_f64<const N: usize, K: LaneKernel<f64, N>>(kernel: K) -> K::Output {
    match N {
        2 => kernel.register::<f64x2>(),
        4 => kernel.register::<f64x4>(),
        _ => kernel.scalar(),
    }
}

macro_rules! impl_register {
    ($register:ident, $scalar:ty, $lanes:literal) => {
        impl Register for $register {
            type Scalar = $scalar;

            const LANES: usize = $lanes;

            #[inline]
            fn splat(value: $scalar) -> Self {
                $register::splat(value)
            }

            #[inline]
            fn load(lanes: &[$scalar]) -> Self {
                let mut array = [0.0; $lanes];
                array.copy_from_slice(&lanes[..$lanes]);
                $register::from(array)
            }

            #[inline]
            fn store(self, lanes: &mut [$scalar]) {
                lanes[..$lanes].copy_from_slice(&self.to_array());
            }

            #[inline]
            fn abs(self) -> Self {
                $register::abs(self)
            }

            #[inline]
            fn min(self, other: Self) -> Self {
                $register::min(self, other)
            }

            #[inline]
            fn max(self, other: Self) -> Self {
                $register::max(self, other)
            }

            #[inline]
            fn sum(self) -> $scalar {
                self.to_array().into_iter().fold(0.0, |acc, lane| acc + lane)
            }

            #[inline]
            fn safe_div(self, divisor: Self) -> Self {
                let zero = $register::splat(0.0);
                divisor.cmp_eq(zero).blend(zero, self / divisor)
            }

            #[inline]
            fn all_eq(self, other: Self) -> bool {
                self.cmp_eq(other).move_mask() == (1 << $lanes) - 1
            }

            #[inline]
            fn all_within(self, other: Self, epsilon: $scalar) -> bool {
                (self - other)
                    .abs()
                    .cmp_gt($register::splat(epsilon))
                    .move_mask()
                    == 0
            }
        }
    };
}

impl_register!(f32x4, f32, 4);
impl_register!(f32x8, f32, 8);
impl_register!(f64x2, f64, 2);
impl_register!(f64x4, f64, 4);
