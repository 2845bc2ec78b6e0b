//! Numbers and numerics.

#![allow(clippy::excessive_precision)]

use crate::{simd::LaneKernel, storage::LaneAlignments};
use bytemuck::Pod;
use num_traits as nt;
use std::fmt;

/// Gathers the traits every element type of a [`Vector`](crate::Vector) or
/// [`Matrix`](crate::Matrix) must implement.
///
/// The trait also decides, per element type, which lane counts have a
/// hardware register (see [`crate::simd`]) and how storage of those lane
/// counts is aligned. Types without any register always run the scalar loop.
pub trait Scalar:
    Copy
    + Default
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Pod
    + LaneAlignments
    + nt::Num
    + nt::NumCast
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;

    /// Tolerance used by default for approximate comparisons, singular
    /// matrix detection and degenerate normalization. Zero for integers.
    const PRECISION_EPSILON: Self;

    /// Lane counts for which a hardware register exists for this type.
    const REGISTER_LANES: &'static [usize];

    /// Absolute value. The identity for unsigned types.
    fn scalar_abs(self) -> Self;

    /// `|self - other|` without overflowing for unsigned types.
    fn abs_diff(self, other: Self) -> Self;

    /// Runs the given kernel on the hardware register for `N` lanes if
    /// there is one, otherwise on the scalar loop.
    #[inline]
    fn execute<const N: usize, K: LaneKernel<Self, N>>(kernel: K) -> K::Output {
        kernel.scalar()
    }
}

/// Gathers traits useful for working with generic floating point types.
pub trait Float:
    Scalar
    + nt::Float
    + nt::FromPrimitive
    + nt::ToPrimitive
    + approx::AbsDiffEq<Epsilon = Self>
    + approx::RelativeEq
    + approx::UlpsEq
{
    const NEG_ONE: Self;
    const ONE_HALF: Self;
    const THREE_HALVES: Self;
    const HALF_TURN_DEGREES: Self;

    /// Machine epsilon scaled by [`EPSILON_SCALING`](Self::EPSILON_SCALING).
    const EPSILON: Self;
    const EPSILON_SCALING: Self;
    const SHADOW_EPSILON: Self;

    const PI: Self;
    const INV_PI: Self;
    const SQRT2: Self;
    const INV_SQRT2: Self;
    const E: Self;

    /// Approximates `1 / sqrt(self)` from a bit-level seed refined by one
    /// Newton-Raphson step. The relative error is below `2e-3`.
    fn fast_inv_sqrt(self) -> Self;
}

macro_rules! impl_scalar_for_float {
    ($f:tt, $execute:ident, $lanes:expr, $precision_epsilon:expr) => {
        impl Scalar for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const PRECISION_EPSILON: Self = $precision_epsilon;
            const REGISTER_LANES: &'static [usize] = &$lanes;

            #[inline]
            fn scalar_abs(self) -> Self {
                self.abs()
            }

            #[inline]
            fn abs_diff(self, other: Self) -> Self {
                (self - other).abs()
            }

            #[inline]
            fn execute<const N: usize, K: LaneKernel<Self, N>>(kernel: K) -> K::Output {
                crate::simd::$execute(kernel)
            }
        }
    };
}

macro_rules! impl_float {
    ($f:tt, $magic:expr) => {
        impl Float for $f {
            const NEG_ONE: Self = -1.0;
            const ONE_HALF: Self = 0.5;
            const THREE_HALVES: Self = 1.5;
            const HALF_TURN_DEGREES: Self = 180.0;
            const EPSILON: Self = crate::consts::$f::EPSILON;
            const EPSILON_SCALING: Self = crate::consts::$f::EPSILON_SCALING;
            const SHADOW_EPSILON: Self = crate::consts::$f::SHADOW_EPSILON;
            const PI: Self = crate::consts::$f::PI;
            const INV_PI: Self = crate::consts::$f::INV_PI;
            const SQRT2: Self = crate::consts::$f::SQRT2;
            const INV_SQRT2: Self = crate::consts::$f::INV_SQRT2;
            const E: Self = crate::consts::$f::E;

            #[inline]
            fn fast_inv_sqrt(self) -> Self {
                let half = self * 0.5;
                let seed = <$f>::from_bits($magic - (self.to_bits() >> 1));
                seed * (1.5 - half * seed * seed)
            }
        }
    };
}

macro_rules! impl_scalar_for_signed {
    ($($i:ty),*) => {
        $(
            impl Scalar for $i {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const TWO: Self = 2;
                const PRECISION_EPSILON: Self = 0;
                const REGISTER_LANES: &'static [usize] = &[];

                #[inline]
                fn scalar_abs(self) -> Self {
                    self.wrapping_abs()
                }

                #[inline]
                fn abs_diff(self, other: Self) -> Self {
                    if self > other {
                        self.wrapping_sub(other)
                    } else {
                        other.wrapping_sub(self)
                    }
                }
            }
        )*
    };
}

macro_rules! impl_scalar_for_unsigned {
    ($($u:ty),*) => {
        $(
            impl Scalar for $u {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const TWO: Self = 2;
                const PRECISION_EPSILON: Self = 0;
                const REGISTER_LANES: &'static [usize] = &[];

                #[inline]
                fn scalar_abs(self) -> Self {
                    self
                }

                #[inline]
                fn abs_diff(self, other: Self) -> Self {
                    if self > other { self - other } else { other - self }
                }
            }
        )*
    };
}

impl_scalar_for_float!(f32, execute_f32, [4, 8], crate::consts::f32::PRECISION_EPSILON);
impl_scalar_for_float!(f64, execute_f64, [2, 4], crate::consts::f64::PRECISION_EPSILON);
impl_float!(f32, 0x5f3759df_u32);
impl_float!(f64, 0x5fe6eb50c7b537a9_u64);
impl_scalar_for_signed!(i8, i16, i32, i64);
impl_scalar_for_unsigned!(u8, u16, u32, u64);

/// Divides `numerator` by `denominator`, giving zero rather than a trap or a
/// non-finite value when `denominator` is zero.
#[inline]
pub fn safe_divide<T: Scalar>(numerator: T, denominator: T) -> T {
    if denominator == T::ZERO {
        T::ZERO
    } else {
        numerator / denominator
    }
}

/// Square root of `value`, with negative input (typically from rounding)
/// clamped to zero first.
#[inline]
pub fn safe_sqrt<F: Float>(value: F) -> F {
    value.max(F::ZERO).sqrt()
}

/// Converts an angle in degrees to radians.
#[inline]
pub fn radians<F: Float>(degrees: F) -> F {
    degrees * (F::PI / F::HALF_TURN_DEGREES)
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn degrees<F: Float>(radians: F) -> F {
    radians * (F::HALF_TURN_DEGREES / F::PI)
}

/// Linearly interpolates between `a` and `b`. `t` is not clamped.
#[inline]
pub fn lerp<F: Float>(a: F, b: F, t: F) -> F {
    a * (F::ONE - t) + b * t
}

/// Clamps `value` to the range `[min, max]`.
#[inline]
pub fn clamp<T: Scalar>(value: T, min: T, max: T) -> T {
    partial_max(partial_min(value, max), min)
}

/// The smaller of the two values, or `a` if they are unordered.
#[inline]
pub fn partial_min<T: Scalar>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

/// The larger of the two values, or `a` if they are unordered.
#[inline]
pub fn partial_max<T: Scalar>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn safe_divide_by_zero_gives_zero() {
        assert_eq!(safe_divide(3.0_f32, 0.0), 0.0);
        assert_eq!(safe_divide(-3.0_f64, 0.0), 0.0);
        assert_eq!(safe_divide(7_i32, 0), 0);
        assert_eq!(safe_divide(8_u32, 2), 4);
    }

    #[test]
    fn safe_sqrt_clamps_negative_input() {
        assert_eq!(safe_sqrt(-1e-9_f32), 0.0);
        assert_abs_diff_eq!(safe_sqrt(4.0_f64), 2.0);
    }

    #[test]
    fn converting_between_degrees_and_radians_works() {
        assert_abs_diff_eq!(radians(180.0_f64), std::f64::consts::PI, epsilon = 1e-12);
        assert_abs_diff_eq!(degrees(std::f32::consts::FRAC_PI_2), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn lerp_extrapolates_outside_unit_interval() {
        assert_abs_diff_eq!(lerp(1.0_f32, 3.0, 0.5), 2.0);
        assert_abs_diff_eq!(lerp(1.0_f32, 3.0, 2.0), 5.0);
    }

    #[test]
    fn clamp_works_for_integers_and_floats() {
        assert_eq!(clamp(5_i32, 0, 3), 3);
        assert_eq!(clamp(-5_i32, 0, 3), 0);
        assert_eq!(clamp(0.5_f32, 0.0, 1.0), 0.5);
    }

    #[test]
    fn abs_diff_does_not_underflow_for_unsigned() {
        assert_eq!(2_u32.abs_diff(5), 3);
        assert_eq!(Scalar::abs_diff(5_u8, 2), 3);
        assert_eq!(Scalar::abs_diff(-4_i32, 3), 7);
    }

    #[test]
    fn fast_inv_sqrt_is_close_to_exact() {
        for value in [0.25_f32, 1.0, 2.0, 10.0, 12345.0] {
            let exact = 1.0 / value.sqrt();
            assert!((value.fast_inv_sqrt() - exact).abs() / exact < 2e-3);
        }
        for value in [0.25_f64, 1.0, 2.0, 10.0, 12345.0] {
            let exact = 1.0 / value.sqrt();
            assert!((value.fast_inv_sqrt() - exact).abs() / exact < 2e-3);
        }
    }
}
