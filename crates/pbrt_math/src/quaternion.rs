//! Quaternions.

use crate::{
    matrix::Matrix,
    num::Float,
    vector::Vector,
};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A quaternion `w + xi + yj + zk` with scalar part `w` and vector part
/// `(x, y, z)`.
///
/// Rotations are represented by unit quaternions, but arithmetic does not
/// keep the norm at one, so normalize explicitly where a rotation is needed.
/// The components are stored as a 4-component [`Vector`] in the order
/// `[w, x, y, z]` and share its register path.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Quaternion<F: Float> {
    components: Vector<F, 4>,
}

pub type Quatf = Quaternion<f32>;
pub type Quatd = Quaternion<f64>;

// SAFETY: `Quaternion` is a transparent wrapper around a `Pod` vector.
unsafe impl<F: Float> Zeroable for Quaternion<F> {}
unsafe impl<F: Float> Pod for Quaternion<F> {}

impl<F: Float> Quaternion<F> {
    /// Creates a quaternion with the given components.
    #[inline]
    pub const fn new(w: F, x: F, y: F, z: F) -> Self {
        Self {
            components: Vector::<F, 4>::new(w, x, y, z),
        }
    }

    /// Creates a quaternion from a scalar and a vector part.
    #[inline]
    pub const fn from_parts(w: F, vector: &Vector<F, 3>) -> Self {
        Self::new(w, vector.x(), vector.y(), vector.z())
    }

    /// The identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(F::ONE, F::ZERO, F::ZERO, F::ZERO)
    }

    /// The quaternion with all zero components.
    #[inline]
    pub const fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO, F::ZERO)
    }

    /// Creates the rotation by `angle` radians about the given axis, which
    /// is assumed to have unit length.
    #[inline]
    pub fn from_axis_angle(axis: &Vector<F, 3>, angle: F) -> Self {
        let (sin, cos) = (angle * F::ONE_HALF).sin_cos();
        Self::from_parts(cos, &(axis * sin))
    }

    /// Creates the rotation given by the Euler angles `yaw`, `pitch` and
    /// `roll` (in radians).
    pub fn from_euler(yaw: F, pitch: F, roll: F) -> Self {
        let (sy, cy) = (yaw * F::ONE_HALF).sin_cos();
        let (sp, cp) = (pitch * F::ONE_HALF).sin_cos();
        let (sr, cr) = (roll * F::ONE_HALF).sin_cos();
        Self::new(
            cy * cp * cr + sy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            sy * cp * sr + cy * sp * cr,
            sy * cp * cr - cy * sp * sr,
        )
    }

    #[inline]
    pub const fn w(&self) -> F {
        self.components.x()
    }

    #[inline]
    pub const fn x(&self) -> F {
        self.components.y()
    }

    #[inline]
    pub const fn y(&self) -> F {
        self.components.z()
    }

    #[inline]
    pub const fn z(&self) -> F {
        self.components.w()
    }

    /// The scalar part `w`.
    #[inline]
    pub const fn scalar(&self) -> F {
        self.w()
    }

    /// The vector part `(x, y, z)`.
    #[inline]
    pub const fn vector(&self) -> Vector<F, 3> {
        Vector::<F, 3>::new(self.x(), self.y(), self.z())
    }

    /// The components in the order `[w, x, y, z]`.
    #[inline]
    pub const fn components(&self) -> &Vector<F, 4> {
        &self.components
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.components.dot(&other.components)
    }

    #[inline]
    pub fn length_squared(&self) -> F {
        self.components.length_squared()
    }

    #[inline]
    pub fn length(&self) -> F {
        self.components.length()
    }

    /// Scales the quaternion to unit length. A quaternion whose length is
    /// at most [`Float::EPSILON`] is left unchanged.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Computes the unit-length version of the quaternion. A quaternion
    /// whose length is at most [`Float::EPSILON`] is returned unchanged.
    #[inline]
    pub fn normalized(&self) -> Self {
        let length = self.length();
        if length <= F::EPSILON {
            *self
        } else {
            self * length.recip()
        }
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w(), -self.x(), -self.y(), -self.z())
    }

    /// Computes the multiplicative inverse. A quaternion whose squared
    /// length is at most [`Float::EPSILON`] gives the zero quaternion.
    #[inline]
    pub fn inverse(&self) -> Self {
        let length_squared = self.length_squared();
        if length_squared <= F::EPSILON {
            Self::zero()
        } else {
            self.conjugate() * length_squared.recip()
        }
    }

    /// Rotates the given vector by this (unit) quaternion.
    #[inline]
    pub fn rotate(&self, vector: &Vector<F, 3>) -> Vector<F, 3> {
        let q = self.vector();
        let uv = q.cross(vector);
        let uuv = q.cross(&uv);
        vector + (uv * self.w() + uuv) * F::TWO
    }

    /// Computes the axis and angle (in radians) of the rotation. A rotation
    /// by a negligible angle reports the unit x-axis and a zero angle.
    pub fn to_axis_angle(&self) -> (Vector<F, 3>, F) {
        let vector = self.vector();
        let vector_length = vector.length();
        if vector_length < F::EPSILON {
            return (Vector::unit_x(), F::ZERO);
        }
        let angle = F::TWO * vector_length.atan2(self.w());
        (vector * vector_length.recip(), angle)
    }

    /// Spherically interpolates from this rotation to `other` along the
    /// shorter arc. Nearly parallel rotations are interpolated linearly and
    /// renormalized.
    pub fn slerp(&self, other: &Self, t: F) -> Self {
        let mut other = *other;
        let mut cos_theta = self.dot(&other);
        if cos_theta < F::ZERO {
            other = -other;
            cos_theta = -cos_theta;
        }

        let threshold = F::from_f64(0.9995).unwrap_or(F::ONE);
        if cos_theta > threshold {
            return (self + (other - self) * t).normalized();
        }

        let theta_0 = cos_theta.acos();
        let theta = theta_0 * t;
        let (sin_theta, cos_theta_t) = theta.sin_cos();
        let sin_theta_0 = theta_0.sin();

        let s0 = cos_theta_t - cos_theta * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;
        self * s0 + other * s1
    }

    /// Computes the 3x3 rotation matrix of this (unit) quaternion.
    pub fn to_matrix3(&self) -> Matrix<F, 3, 3> {
        let [w, x, y, z] = *self.components.as_array();
        let two = F::TWO;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Matrix::from_row_arrays([
            [F::ONE - two * (yy + zz), two * (xy - wz), two * (xz + wy)],
            [two * (xy + wz), F::ONE - two * (xx + zz), two * (yz - wx)],
            [two * (xz - wy), two * (yz + wx), F::ONE - two * (xx + yy)],
        ])
    }

    /// Computes the 4x4 homogeneous rotation matrix of this (unit)
    /// quaternion.
    pub fn to_matrix(&self) -> Matrix<F, 4, 4> {
        let rotation = self.to_matrix3();
        let mut m = Matrix::identity();
        for i in 0..3 {
            m.set_row(i, rotation.row(i).extend(F::ZERO));
        }
        m
    }

    /// Whether no component differs from the corresponding component of
    /// `other` by more than [`Float::EPSILON`].
    #[inline]
    pub fn approx_equal(&self, other: &Self) -> bool {
        self.approx_equal_with(other, F::EPSILON)
    }

    #[inline]
    pub fn approx_equal_with(&self, other: &Self, epsilon: F) -> bool {
        self.components.approx_equal_with(&other.components, epsilon)
    }
}

/// Spherically interpolates between two rotations. See
/// [`Quaternion::slerp`].
#[inline]
pub fn slerp<F: Float>(q1: &Quaternion<F>, q2: &Quaternion<F>, t: F) -> Quaternion<F> {
    q1.slerp(q2, t)
}

impl<F: Float> Default for Quaternion<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> PartialEq for Quaternion<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl<F: Float> fmt::Debug for Quaternion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("w", &self.w())
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}

impl_binop!([F: Float], Add, add, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion {
        components: a.components + b.components,
    }
});

impl_binop!([F: Float], Sub, sub, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion {
        components: a.components - b.components,
    }
});

impl_binop!([F: Float], Mul, mul, Quaternion<F>, F, Quaternion<F>, |a, b| {
    Quaternion {
        components: a.components * *b,
    }
});

impl_binop!([F: Float], Div, div, Quaternion<F>, F, Quaternion<F>, |a, b| {
    Quaternion {
        components: a.components / *b,
    }
});

impl_binop!([F: Float], Mul, mul, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    let [w1, x1, y1, z1] = *a.components.as_array();
    let [w2, x2, y2, z2] = *b.components.as_array();
    Quaternion::new(
        w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
        w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
        w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
        w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
    )
});

impl_binop!([F: Float], Mul, mul, Quaternion<F>, Vector<F, 3>, Vector<F, 3>, |a, b| {
    a.rotate(b)
});

impl_binop_assign!([F: Float], AddAssign, add_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    a.components += b.components;
});

impl_binop_assign!([F: Float], SubAssign, sub_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    a.components -= b.components;
});

impl_binop_assign!([F: Float], MulAssign, mul_assign, Quaternion<F>, F, |a, b| {
    a.components *= *b;
});

impl_binop_assign!([F: Float], MulAssign, mul_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a * b;
});

impl_unary_op!([F: Float], Neg, neg, Quaternion<F>, Quaternion<F>, |val| {
    Quaternion {
        components: -val.components,
    }
});

impl<F: Float> AbsDiffEq for Quaternion<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.approx_equal_with(other, epsilon)
    }
}

impl<F: Float> RelativeEq for Quaternion<F> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.components
            .relative_eq(&other.components, epsilon, max_relative)
    }
}

#[cfg(feature = "serde")]
impl<F: Float + serde::Serialize> serde::Serialize for Quaternion<F> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.components, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, F: Float + serde::Deserialize<'de>> serde::Deserialize<'de> for Quaternion<F> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vector<F, 4> as serde::Deserialize>::deserialize(deserializer)
            .map(|components| Self { components })
    }
}
