//! Unrolled products, determinants and inverses for 2x2, 3x3 and 4x4
//! matrices stored as flat row-major arrays.

use crate::num::{Float, Scalar};

#[inline]
pub(super) fn mul_vector2<T: Scalar>(m: &[T; 4], v: &[T; 2]) -> [T; 2] {
    [m[0] * v[0] + m[1] * v[1], m[2] * v[0] + m[3] * v[1]]
}

#[inline]
pub(super) fn mul_vector3<T: Scalar>(m: &[T; 9], v: &[T; 3]) -> [T; 3] {
    [
        m[0] * v[0] + m[1] * v[1] + m[2] * v[2],
        m[3] * v[0] + m[4] * v[1] + m[5] * v[2],
        m[6] * v[0] + m[7] * v[1] + m[8] * v[2],
    ]
}

#[inline]
pub(super) fn mul_vector4<T: Scalar>(m: &[T; 16], v: &[T; 4]) -> [T; 4] {
    [
        m[0] * v[0] + m[1] * v[1] + m[2] * v[2] + m[3] * v[3],
        m[4] * v[0] + m[5] * v[1] + m[6] * v[2] + m[7] * v[3],
        m[8] * v[0] + m[9] * v[1] + m[10] * v[2] + m[11] * v[3],
        m[12] * v[0] + m[13] * v[1] + m[14] * v[2] + m[15] * v[3],
    ]
}

#[inline]
pub(super) fn mul2<T: Scalar>(a: &[T; 4], b: &[T; 4]) -> [T; 4] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
    ]
}

#[inline]
pub(super) fn mul3<T: Scalar>(a: &[T; 9], b: &[T; 9]) -> [T; 9] {
    let mut out = [T::ZERO; 9];
    for i in 0..3 {
        let (a0, a1, a2) = (a[3 * i], a[3 * i + 1], a[3 * i + 2]);
        out[3 * i] = a0 * b[0] + a1 * b[3] + a2 * b[6];
        out[3 * i + 1] = a0 * b[1] + a1 * b[4] + a2 * b[7];
        out[3 * i + 2] = a0 * b[2] + a1 * b[5] + a2 * b[8];
    }
    out
}

#[inline]
pub(super) fn mul4<T: Scalar>(a: &[T; 16], b: &[T; 16]) -> [T; 16] {
    let mut out = [T::ZERO; 16];
    for i in 0..4 {
        let (a0, a1, a2, a3) = (a[4 * i], a[4 * i + 1], a[4 * i + 2], a[4 * i + 3]);
        for j in 0..4 {
            out[4 * i + j] = a0 * b[j] + a1 * b[4 + j] + a2 * b[8 + j] + a3 * b[12 + j];
        }
    }
    out
}

#[inline]
pub(super) fn determinant2<T: Scalar>(m: &[T; 4]) -> T {
    m[0] * m[3] - m[1] * m[2]
}

#[inline]
pub(super) fn determinant3<T: Scalar>(m: &[T; 9]) -> T {
    m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
        + m[2] * (m[3] * m[7] - m[4] * m[6])
}

/// 2x2 minors of the upper two rows (`s`) and lower two rows (`c`) of a 4x4
/// matrix, which the determinant and the inverse are both expanded in.
struct Minors4<T> {
    s: [T; 6],
    c: [T; 6],
}

impl<T: Scalar> Minors4<T> {
    #[inline]
    fn new(m: &[T; 16]) -> Self {
        Self {
            s: [
                m[0] * m[5] - m[4] * m[1],
                m[0] * m[6] - m[4] * m[2],
                m[0] * m[7] - m[4] * m[3],
                m[1] * m[6] - m[5] * m[2],
                m[1] * m[7] - m[5] * m[3],
                m[2] * m[7] - m[6] * m[3],
            ],
            c: [
                m[8] * m[13] - m[12] * m[9],
                m[8] * m[14] - m[12] * m[10],
                m[8] * m[15] - m[12] * m[11],
                m[9] * m[14] - m[13] * m[10],
                m[9] * m[15] - m[13] * m[11],
                m[10] * m[15] - m[14] * m[11],
            ],
        }
    }

    #[inline]
    fn determinant(&self) -> T {
        let Self { s, c } = self;
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

#[inline]
pub(super) fn determinant4<T: Scalar>(m: &[T; 16]) -> T {
    Minors4::new(m).determinant()
}

/// Whether a determinant is too close to zero for the matrix to be inverted.
#[inline]
fn is_singular<F: Float>(determinant: F) -> bool {
    determinant.abs() <= F::PRECISION_EPSILON
}

#[inline]
pub(super) fn inverse1<F: Float>(value: F) -> Option<F> {
    (!is_singular(value)).then(|| value.recip())
}

#[inline]
pub(super) fn inverse2<F: Float>(m: &[F; 4]) -> Option<[F; 4]> {
    let det = determinant2(m);
    if is_singular(det) {
        return None;
    }
    let inv_det = det.recip();
    Some([
        m[3] * inv_det,
        -m[1] * inv_det,
        -m[2] * inv_det,
        m[0] * inv_det,
    ])
}

#[inline]
pub(super) fn inverse3<F: Float>(m: &[F; 9]) -> Option<[F; 9]> {
    let det = determinant3(m);
    if is_singular(det) {
        return None;
    }
    let inv_det = det.recip();
    let [a, b, c, d, e, f, g, h, i] = *m;
    Some(
        [
            e * i - f * h,
            c * h - b * i,
            b * f - c * e,
            f * g - d * i,
            a * i - c * g,
            c * d - a * f,
            d * h - e * g,
            b * g - a * h,
            a * e - b * d,
        ]
        .map(|cofactor| cofactor * inv_det),
    )
}

#[inline]
pub(super) fn inverse4<F: Float>(m: &[F; 16]) -> Option<[F; 16]> {
    let minors = Minors4::new(m);
    let det = minors.determinant();
    if is_singular(det) {
        return None;
    }
    let inv_det = det.recip();
    let Minors4 { s, c } = minors;
    Some(
        [
            m[5] * c[5] - m[6] * c[4] + m[7] * c[3],
            -m[1] * c[5] + m[2] * c[4] - m[3] * c[3],
            m[13] * s[5] - m[14] * s[4] + m[15] * s[3],
            -m[9] * s[5] + m[10] * s[4] - m[11] * s[3],
            -m[4] * c[5] + m[6] * c[2] - m[7] * c[1],
            m[0] * c[5] - m[2] * c[2] + m[3] * c[1],
            -m[12] * s[5] + m[14] * s[2] - m[15] * s[1],
            m[8] * s[5] - m[10] * s[2] + m[11] * s[1],
            m[4] * c[4] - m[5] * c[2] + m[7] * c[0],
            -m[0] * c[4] + m[1] * c[2] - m[3] * c[0],
            m[12] * s[4] - m[13] * s[2] + m[15] * s[0],
            -m[8] * s[4] + m[9] * s[2] - m[11] * s[0],
            -m[4] * c[3] + m[5] * c[1] - m[6] * c[0],
            m[0] * c[3] - m[1] * c[1] + m[2] * c[0],
            -m[12] * s[3] + m[13] * s[1] - m[14] * s[0],
            m[8] * s[3] - m[9] * s[1] + m[10] * s[0],
        ]
        .map(|cofactor| cofactor * inv_det),
    )
}
