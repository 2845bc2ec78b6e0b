//! Vectors.

use crate::{
    kernel::{Abs, BinaryOp, Dot, Equal, Negate, Within, Zip},
    num::{self, Float, Scalar},
    storage::{LaneCount, Storage, SupportedLaneCount},
};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits::NumCast;
use std::{
    fmt,
    ops::{Index, IndexMut, Neg},
    slice,
};

/// A vector of `N` components of type `T`.
///
/// Arithmetic, comparison and reduction run on a hardware register when `T`
/// and `N` have one (see [`crate::simd`]) and as plain loops otherwise. The
/// two paths give the same results, including for division by zero, which
/// gives zero in the affected components rather than an infinity or NaN.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Vector<T: Scalar, const N: usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    storage: Storage<T, N>,
}

pub type Vec2f = Vector<f32, 2>;
pub type Vec3f = Vector<f32, 3>;
pub type Vec4f = Vector<f32, 4>;
pub type Vec2d = Vector<f64, 2>;
pub type Vec3d = Vector<f64, 3>;
pub type Vec4d = Vector<f64, 4>;
pub type Vec2i = Vector<i32, 2>;
pub type Vec3i = Vector<i32, 3>;
pub type Vec4i = Vector<i32, 4>;
pub type Vec2u = Vector<u32, 2>;
pub type Vec3u = Vector<u32, 3>;
pub type Vec4u = Vector<u32, 4>;

// SAFETY: `Vector` is a transparent wrapper around `Pod` storage.
unsafe impl<T: Scalar, const N: usize> Zeroable for Vector<T, N> where LaneCount<N>: SupportedLaneCount {}
unsafe impl<T: Scalar, const N: usize> Pod for Vector<T, N> where LaneCount<N>: SupportedLaneCount {}

impl<T: Scalar> Vector<T, 2> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self::from_array([x, y])
    }

    /// Appends the given component.
    #[inline]
    pub const fn extend(&self, z: T) -> Vector<T, 3> {
        Vector::<T, 3>::new(self.x(), self.y(), z)
    }
}

impl<T: Scalar> Vector<T, 3> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z])
    }

    /// Appends the given component.
    #[inline]
    pub const fn extend(&self, w: T) -> Vector<T, 4> {
        Vector::<T, 4>::new(self.x(), self.y(), self.z(), w)
    }

    /// Computes the cross product of this and the given vector.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = *self.as_array();
        let [bx, by, bz] = *other.as_array();
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl<T: Scalar> Vector<T, 4> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_array([x, y, z, w])
    }
}

impl<T: Scalar, const N: usize> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// The number of components.
    pub const DIMENSION: usize = N;

    /// Whether operations on this vector type run on a hardware register.
    pub const HARDWARE_ACCELERATED: bool = Storage::<T, N>::HARDWARE_ACCELERATED;

    /// Alignment of this vector type in bytes: the register width when it
    /// has a register path and the alignment of `T` otherwise.
    pub const ALIGNMENT: usize = align_of::<Self>();

    /// Creates a vector with the given components.
    #[inline]
    pub const fn from_array(components: [T; N]) -> Self {
        Self {
            storage: Storage::new(components),
        }
    }

    /// Creates a vector with all components set to the given value.
    #[inline]
    pub const fn filled(value: T) -> Self {
        Self {
            storage: Storage::filled(value),
        }
    }

    /// Creates a vector with all zeros.
    #[inline]
    pub const fn zero() -> Self {
        Self::filled(T::ZERO)
    }

    /// Creates a vector with all ones.
    #[inline]
    pub const fn one() -> Self {
        Self::filled(T::ONE)
    }

    /// Creates a vector whose component `i` is `f(i)`.
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self::from_array(std::array::from_fn(f))
    }

    /// Creates a vector from the given slice, or returns [`None`] if the
    /// slice does not have exactly `N` elements.
    #[inline]
    pub fn try_from_slice(components: &[T]) -> Option<Self> {
        components.try_into().ok().map(Self::from_array)
    }

    /// Converts the vector to element type `U` component by component. A
    /// component that is not representable in `U` becomes zero.
    #[inline]
    pub fn cast<U: Scalar>(&self) -> Vector<U, N> {
        Vector::from_array(
            self.as_array()
                .map(|value| <U as NumCast>::from(value).unwrap_or(U::ZERO)),
        )
    }

    /// Creates the unit vector along the first axis.
    #[inline]
    pub const fn unit_x() -> Self {
        const { assert!(N >= 1, "unit_x requires at least one component") };
        let mut v = Self::zero();
        v.storage.as_array_mut()[0] = T::ONE;
        v
    }

    /// Creates the unit vector along the second axis.
    #[inline]
    pub const fn unit_y() -> Self {
        const { assert!(N >= 2, "unit_y requires at least two components") };
        let mut v = Self::zero();
        v.storage.as_array_mut()[1] = T::ONE;
        v
    }

    /// Creates the unit vector along the third axis.
    #[inline]
    pub const fn unit_z() -> Self {
        const { assert!(N >= 3, "unit_z requires at least three components") };
        let mut v = Self::zero();
        v.storage.as_array_mut()[2] = T::ONE;
        v
    }

    /// Creates the unit vector along the fourth axis.
    #[inline]
    pub const fn unit_w() -> Self {
        const { assert!(N >= 4, "unit_w requires at least four components") };
        let mut v = Self::zero();
        v.storage.as_array_mut()[3] = T::ONE;
        v
    }

    /// The number of components.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    #[inline]
    pub const fn x(&self) -> T {
        const { assert!(N >= 1, "x requires at least one component") };
        self.storage.as_array()[0]
    }

    #[inline]
    pub const fn y(&self) -> T {
        const { assert!(N >= 2, "y requires at least two components") };
        self.storage.as_array()[1]
    }

    #[inline]
    pub const fn z(&self) -> T {
        const { assert!(N >= 3, "z requires at least three components") };
        self.storage.as_array()[2]
    }

    #[inline]
    pub const fn w(&self) -> T {
        const { assert!(N >= 4, "w requires at least four components") };
        self.storage.as_array()[3]
    }

    #[inline]
    pub const fn x_mut(&mut self) -> &mut T {
        const { assert!(N >= 1, "x requires at least one component") };
        &mut self.storage.as_array_mut()[0]
    }

    #[inline]
    pub const fn y_mut(&mut self) -> &mut T {
        const { assert!(N >= 2, "y requires at least two components") };
        &mut self.storage.as_array_mut()[1]
    }

    #[inline]
    pub const fn z_mut(&mut self) -> &mut T {
        const { assert!(N >= 3, "z requires at least three components") };
        &mut self.storage.as_array_mut()[2]
    }

    #[inline]
    pub const fn w_mut(&mut self) -> &mut T {
        const { assert!(N >= 4, "w requires at least four components") };
        &mut self.storage.as_array_mut()[3]
    }

    /// The first two components.
    #[inline]
    pub const fn xy(&self) -> Vector<T, 2> {
        Vector::<T, 2>::new(self.x(), self.y())
    }

    /// The first and third components.
    #[inline]
    pub const fn xz(&self) -> Vector<T, 2> {
        Vector::<T, 2>::new(self.x(), self.z())
    }

    /// The second and third components.
    #[inline]
    pub const fn yz(&self) -> Vector<T, 2> {
        Vector::<T, 2>::new(self.y(), self.z())
    }

    /// The first three components.
    #[inline]
    pub const fn xyz(&self) -> Vector<T, 3> {
        Vector::<T, 3>::new(self.x(), self.y(), self.z())
    }

    /// The component at the given index.
    ///
    /// # Panics
    /// If `idx` is not smaller than `N`.
    #[inline]
    pub fn at(&self, idx: usize) -> T {
        debug_assert!(idx < N, "component index {idx} out of bounds for dimension {N}");
        self.as_array()[idx]
    }

    /// A mutable reference to the component at the given index.
    ///
    /// # Panics
    /// If `idx` is not smaller than `N`.
    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < N, "component index {idx} out of bounds for dimension {N}");
        &mut self.as_array_mut()[idx]
    }

    /// The underlying lane storage.
    #[inline]
    pub const fn storage(&self) -> &Storage<T, N> {
        &self.storage
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        self.storage.as_array()
    }

    #[inline]
    pub const fn as_array_mut(&mut self) -> &mut [T; N] {
        self.storage.as_array_mut()
    }

    #[inline]
    pub const fn into_array(self) -> [T; N] {
        self.storage.into_array()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.as_array()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_array_mut()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_array().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_array_mut().iter_mut()
    }

    /// Applies the given function to each component.
    #[inline]
    pub fn mapped(&self, f: impl FnMut(T) -> T) -> Self {
        Self::from_array(self.as_array().map(f))
    }

    #[inline]
    pub(crate) fn zip(&self, other: &Self, op: BinaryOp) -> Self {
        Self::from_array(T::execute(Zip {
            lhs: self.as_array(),
            rhs: other.as_array(),
            op,
        }))
    }

    /// Computes the dot product of this and the given vector.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        T::execute(Dot {
            lhs: self.as_array(),
            rhs: other.as_array(),
        })
    }

    /// Computes the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    /// Computes the squared distance between this and the given vector.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> T {
        (other - self).length_squared()
    }

    /// Computes the component-wise product of this and the given vector.
    #[inline]
    pub fn component_mul(&self, other: &Self) -> Self {
        self.zip(other, BinaryOp::Mul)
    }

    /// Computes the component-wise minimum of this and the given vector.
    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        self.zip(other, BinaryOp::Min)
    }

    /// Computes the component-wise maximum of this and the given vector.
    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        self.zip(other, BinaryOp::Max)
    }

    /// Computes the component-wise absolute value of the vector.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::from_array(T::execute(Abs {
            lanes: self.as_array(),
        }))
    }

    /// Clamps every component to the range `[min, max]`.
    #[inline]
    pub fn clamp(&self, min: T, max: T) -> Self {
        self.clamp_componentwise(&Self::filled(min), &Self::filled(max))
    }

    /// Clamps each component to the range given by the corresponding
    /// components of `min` and `max`.
    #[inline]
    pub fn clamp_componentwise(&self, min: &Self, max: &Self) -> Self {
        self.component_min(max).component_max(min)
    }

    /// The smallest component.
    #[inline]
    pub fn min_component(&self) -> T {
        self.as_array()[self.min_dimension()]
    }

    /// The largest component.
    #[inline]
    pub fn max_component(&self) -> T {
        self.as_array()[self.max_dimension()]
    }

    /// Index of the smallest component. Ties resolve to the lowest index.
    #[inline]
    pub fn min_dimension(&self) -> usize {
        let lanes = self.as_array();
        (1..N).fold(0, |best, idx| if lanes[idx] < lanes[best] { idx } else { best })
    }

    /// Index of the largest component. Ties resolve to the lowest index.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        let lanes = self.as_array();
        (1..N).fold(0, |best, idx| if lanes[idx] > lanes[best] { idx } else { best })
    }

    /// Whether no component differs from the corresponding component of
    /// `other` by more than [`Scalar::PRECISION_EPSILON`].
    #[inline]
    pub fn approx_equal(&self, other: &Self) -> bool {
        self.approx_equal_with(other, T::PRECISION_EPSILON)
    }

    /// Whether no component differs from the corresponding component of
    /// `other` by more than `epsilon`.
    #[inline]
    pub fn approx_equal_with(&self, other: &Self, epsilon: T) -> bool {
        T::execute(Within {
            lhs: self.as_array(),
            rhs: other.as_array(),
            epsilon,
        })
    }
}

impl<F: Float, const N: usize> Vector<F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Computes the length of the vector.
    #[inline]
    pub fn length(&self) -> F {
        num::safe_sqrt(self.length_squared())
    }

    /// Computes the distance between this and the given vector.
    #[inline]
    pub fn distance(&self, other: &Self) -> F {
        (other - self).length()
    }

    /// Scales the vector to unit length. A vector shorter than
    /// [`Float::EPSILON`] becomes the zero vector.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Computes the normalized version of the vector. A vector shorter than
    /// [`Float::EPSILON`] gives the zero vector.
    #[inline]
    pub fn normalized(&self) -> Self {
        let length = self.length();
        if length < F::EPSILON {
            Self::zero()
        } else {
            self * length.recip()
        }
    }

    /// Computes the normalized version of the vector, or returns `fallback`
    /// if the squared length is below [`Scalar::PRECISION_EPSILON`].
    #[inline]
    pub fn safe_normalized(&self, fallback: &Self) -> Self {
        let length_squared = self.length_squared();
        if length_squared < F::PRECISION_EPSILON {
            *fallback
        } else {
            self * length_squared.sqrt().recip()
        }
    }

    /// Like [`Self::safe_normalized`] with the unit vector along the first
    /// axis as the fallback.
    #[inline]
    pub fn safe_normalized_or_unit_x(&self) -> Self {
        self.safe_normalized(&Self::unit_x())
    }

    /// Approximates the length of the vector using
    /// [`Float::fast_inv_sqrt`].
    #[inline]
    pub fn fast_length(&self) -> F {
        let length_squared = self.length_squared();
        if length_squared <= F::ZERO {
            F::ZERO
        } else {
            length_squared * length_squared.fast_inv_sqrt()
        }
    }

    /// Approximately scales the vector to unit length using
    /// [`Float::fast_inv_sqrt`].
    #[inline]
    pub fn fast_normalize(&mut self) {
        *self = self.fast_normalized();
    }

    /// Computes an approximately normalized version of the vector using
    /// [`Float::fast_inv_sqrt`]. A vector whose squared length is below
    /// [`Float::EPSILON`] gives the zero vector.
    #[inline]
    pub fn fast_normalized(&self) -> Self {
        let length_squared = self.length_squared();
        if length_squared < F::EPSILON {
            Self::zero()
        } else {
            self * length_squared.fast_inv_sqrt()
        }
    }

    /// Projects this vector onto the given vector. Projecting onto a zero
    /// vector gives the zero vector.
    #[inline]
    pub fn project_onto(&self, onto: &Self) -> Self {
        let onto_length_squared = onto.length_squared();
        if onto_length_squared == F::ZERO {
            Self::zero()
        } else {
            onto * (self.dot(onto) / onto_length_squared)
        }
    }

    /// Reflects the vector about the plane with the given unit normal.
    #[inline]
    pub fn reflect(&self, normal: &Self) -> Self {
        self - normal * (F::TWO * self.dot(normal))
    }

    /// Refracts the vector through the surface with the given unit normal,
    /// where `eta` is the ratio of refractive indices. Total internal
    /// reflection gives the zero vector.
    #[inline]
    pub fn refract(&self, normal: &Self, eta: F) -> Self {
        let cos_incident = self.dot(normal);
        let sin2_transmitted = eta * eta * (F::ONE - cos_incident * cos_incident);
        if sin2_transmitted > F::ONE {
            return Self::zero();
        }
        let cos_transmitted = (F::ONE - sin2_transmitted).sqrt();
        self * eta - normal * (eta * cos_incident + cos_transmitted)
    }

    /// Linearly interpolates between this and the given vector. `t` is not
    /// clamped.
    #[inline]
    pub fn lerp(&self, other: &Self, t: F) -> Self {
        self * (F::ONE - t) + other * t
    }
}

/// Computes the cross product of the two vectors.
#[inline]
pub fn cross<T: Scalar>(a: &Vector<T, 3>, b: &Vector<T, 3>) -> Vector<T, 3> {
    a.cross(b)
}

/// Computes the component-wise minimum of the two vectors.
#[inline]
pub fn min<T: Scalar, const N: usize>(a: &Vector<T, N>, b: &Vector<T, N>) -> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    a.component_min(b)
}

/// Computes the component-wise maximum of the two vectors.
#[inline]
pub fn max<T: Scalar, const N: usize>(a: &Vector<T, N>, b: &Vector<T, N>) -> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    a.component_max(b)
}

macro_rules! impl_const_ops {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> Vector<$t, N>
            where
                LaneCount<N>: SupportedLaneCount,
            {
                /// Component-wise sum as a plain loop, usable in constant
                /// expressions.
                pub const fn const_add(&self, other: &Self) -> Self {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut out = [0 as $t; N];
                    let mut idx = 0;
                    while idx < N {
                        out[idx] = a[idx] + b[idx];
                        idx += 1;
                    }
                    Self::from_array(out)
                }

                /// Component-wise difference as a plain loop, usable in
                /// constant expressions.
                pub const fn const_sub(&self, other: &Self) -> Self {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut out = [0 as $t; N];
                    let mut idx = 0;
                    while idx < N {
                        out[idx] = a[idx] - b[idx];
                        idx += 1;
                    }
                    Self::from_array(out)
                }

                /// Component-wise product as a plain loop, usable in
                /// constant expressions.
                pub const fn const_mul(&self, other: &Self) -> Self {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut out = [0 as $t; N];
                    let mut idx = 0;
                    while idx < N {
                        out[idx] = a[idx] * b[idx];
                        idx += 1;
                    }
                    Self::from_array(out)
                }

                /// Component-wise quotient as a plain loop, usable in
                /// constant expressions. Components divided by zero become
                /// zero.
                pub const fn const_div(&self, other: &Self) -> Self {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut out = [0 as $t; N];
                    let mut idx = 0;
                    while idx < N {
                        if b[idx] != 0 as $t {
                            out[idx] = a[idx] / b[idx];
                        }
                        idx += 1;
                    }
                    Self::from_array(out)
                }

                /// Multiplies every component by `scalar` as a plain loop,
                /// usable in constant expressions.
                pub const fn const_scale(&self, scalar: $t) -> Self {
                    let a = self.as_array();
                    let mut out = [0 as $t; N];
                    let mut idx = 0;
                    while idx < N {
                        out[idx] = a[idx] * scalar;
                        idx += 1;
                    }
                    Self::from_array(out)
                }

                /// Dot product as a plain loop, usable in constant
                /// expressions.
                pub const fn const_dot(&self, other: &Self) -> $t {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut sum = 0 as $t;
                    let mut idx = 0;
                    while idx < N {
                        sum += a[idx] * b[idx];
                        idx += 1;
                    }
                    sum
                }

                /// Exact equality as a plain loop, usable in constant
                /// expressions.
                pub const fn const_eq(&self, other: &Self) -> bool {
                    let (a, b) = (self.as_array(), other.as_array());
                    let mut idx = 0;
                    while idx < N {
                        if a[idx] != b[idx] {
                            return false;
                        }
                        idx += 1;
                    }
                    true
                }
            }

            impl_binop!([const N: usize] where [LaneCount<N>: SupportedLaneCount], Mul, mul, $t, Vector<$t, N>, Vector<$t, N>, |a, b| {
                b * *a
            });
        )*
    };
}

impl_const_ops!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: Scalar, const N: usize> Default for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const N: usize> PartialEq for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        T::execute(Equal {
            lhs: self.as_array(),
            rhs: other.as_array(),
        })
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(components: [T; N]) -> Self {
        Self::from_array(components)
    }
}

impl<T: Scalar, const N: usize> From<Vector<T, N>> for [T; N]
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(vector: Vector<T, N>) -> Self {
        vector.into_array()
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        debug_assert!(idx < N, "component index {idx} out of bounds for dimension {N}");
        &self.as_array()[idx]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        self.at_mut(idx)
    }
}

impl<'a, T: Scalar, const N: usize> IntoIterator for &'a Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Scalar, const N: usize> IntoIterator for &'a mut Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Scalar, const N: usize> IntoIterator for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_array().into_iter()
    }
}

impl<T: Scalar, const N: usize> fmt::Debug for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Vector");
        for value in self {
            tuple.field(value);
        }
        tuple.finish()
    }
}

impl<T: Scalar, const N: usize> fmt::Display for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, value) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Add, add, Vector<T, N>, Vector<T, N>, Vector<T, N>, |a, b| {
    a.zip(b, BinaryOp::Add)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Sub, sub, Vector<T, N>, Vector<T, N>, Vector<T, N>, |a, b| {
    a.zip(b, BinaryOp::Sub)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Mul, mul, Vector<T, N>, Vector<T, N>, Vector<T, N>, |a, b| {
    a.zip(b, BinaryOp::Mul)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Div, div, Vector<T, N>, Vector<T, N>, Vector<T, N>, |a, b| {
    a.zip(b, BinaryOp::SafeDiv)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Add, add, Vector<T, N>, T, Vector<T, N>, |a, b| {
    a.zip(&Vector::filled(*b), BinaryOp::Add)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Sub, sub, Vector<T, N>, T, Vector<T, N>, |a, b| {
    a.zip(&Vector::filled(*b), BinaryOp::Sub)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Mul, mul, Vector<T, N>, T, Vector<T, N>, |a, b| {
    a.zip(&Vector::filled(*b), BinaryOp::Mul)
});

impl_binop!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], Div, div, Vector<T, N>, T, Vector<T, N>, |a, b| {
    a.zip(&Vector::filled(*b), BinaryOp::SafeDiv)
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], AddAssign, add_assign, Vector<T, N>, Vector<T, N>, |a, b| {
    *a = a.zip(b, BinaryOp::Add);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], SubAssign, sub_assign, Vector<T, N>, Vector<T, N>, |a, b| {
    *a = a.zip(b, BinaryOp::Sub);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], MulAssign, mul_assign, Vector<T, N>, Vector<T, N>, |a, b| {
    *a = a.zip(b, BinaryOp::Mul);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], DivAssign, div_assign, Vector<T, N>, Vector<T, N>, |a, b| {
    *a = a.zip(b, BinaryOp::SafeDiv);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], AddAssign, add_assign, Vector<T, N>, T, |a, b| {
    *a = a.zip(&Vector::filled(*b), BinaryOp::Add);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], SubAssign, sub_assign, Vector<T, N>, T, |a, b| {
    *a = a.zip(&Vector::filled(*b), BinaryOp::Sub);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], MulAssign, mul_assign, Vector<T, N>, T, |a, b| {
    *a = a.zip(&Vector::filled(*b), BinaryOp::Mul);
});

impl_binop_assign!([T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount], DivAssign, div_assign, Vector<T, N>, T, |a, b| {
    *a = a.zip(&Vector::filled(*b), BinaryOp::SafeDiv);
});

impl_unary_op!([T: Scalar + Neg<Output = T>, const N: usize] where [LaneCount<N>: SupportedLaneCount], Neg, neg, Vector<T, N>, Vector<T, N>, |val| {
    Vector::from_array(T::execute(Negate {
        lanes: val.as_array(),
    }))
});

impl<F: Float, const N: usize> AbsDiffEq for Vector<F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::PRECISION_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.approx_equal_with(other, epsilon)
    }
}

impl<F: Float, const N: usize> RelativeEq for Vector<F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.iter()
            .zip(other)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(feature = "serde")]
impl<T: Scalar + serde::Serialize, const N: usize> serde::Serialize for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.storage, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Scalar + serde::Deserialize<'de>, const N: usize> serde::Deserialize<'de>
    for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Storage<T, N> as serde::Deserialize>::deserialize(deserializer)
            .map(|storage| Self { storage })
    }
}
