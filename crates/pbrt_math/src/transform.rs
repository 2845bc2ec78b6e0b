//! Transforms.
//!
//! Builders for homogeneous transformation matrices. All matrices act on
//! column vectors, so `a * b` applies `b` first, and translations live in
//! the last column.

use crate::{
    matrix::Matrix,
    num::Float,
    quaternion::Quaternion,
    storage::{LaneCount, SupportedLaneCount},
    vector::Vector,
};

/// Handedness of a coordinate system, which decides the direction a camera
/// looks along in view space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// The camera looks along the negative z-axis.
    #[default]
    RightHanded,
    /// The camera looks along the positive z-axis.
    LeftHanded,
}

/// Creates a 3D translation matrix.
pub fn translate<F: Float>(offset: &Vector<F, 3>) -> Matrix<F, 4, 4> {
    let mut m = Matrix::identity();
    m.set_column(3, &offset.extend(F::ONE));
    m
}

/// Creates a 2D translation matrix.
pub fn translate_2d<F: Float>(offset: &Vector<F, 2>) -> Matrix<F, 3, 3> {
    let mut m = Matrix::identity();
    m.set_column(2, &offset.extend(F::ONE));
    m
}

/// Creates a 3D scaling matrix with the given per-axis factors.
pub fn scale<F: Float>(factors: &Vector<F, 3>) -> Matrix<F, 4, 4> {
    Matrix::from_diagonal(&factors.extend(F::ONE))
}

/// Creates a 3D scaling matrix with the same factor along every axis.
pub fn scale_uniform<F: Float>(factor: F) -> Matrix<F, 4, 4> {
    scale(&Vector::filled(factor))
}

/// Creates a 2D scaling matrix with the given per-axis factors.
pub fn scale_2d<F: Float>(factors: &Vector<F, 2>) -> Matrix<F, 3, 3> {
    Matrix::from_diagonal(&factors.extend(F::ONE))
}

/// Creates a 2D rotation matrix for a counterclockwise rotation by `angle`
/// radians.
pub fn rotate_2d<F: Float>(angle: F) -> Matrix<F, 3, 3> {
    let (s, c) = angle.sin_cos();
    Matrix::from_row_arrays([
        [c, -s, F::ZERO],
        [s, c, F::ZERO],
        [F::ZERO, F::ZERO, F::ONE],
    ])
}

/// Creates a matrix rotating by `angle` radians about the x-axis.
pub fn rotate_x<F: Float>(angle: F) -> Matrix<F, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, i) = (F::ZERO, F::ONE);
    Matrix::from_row_arrays([[i, o, o, o], [o, c, -s, o], [o, s, c, o], [o, o, o, i]])
}

/// Creates a matrix rotating by `angle` radians about the y-axis.
pub fn rotate_y<F: Float>(angle: F) -> Matrix<F, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, i) = (F::ZERO, F::ONE);
    Matrix::from_row_arrays([[c, o, s, o], [o, i, o, o], [-s, o, c, o], [o, o, o, i]])
}

/// Creates a matrix rotating by `angle` radians about the z-axis.
pub fn rotate_z<F: Float>(angle: F) -> Matrix<F, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, i) = (F::ZERO, F::ONE);
    Matrix::from_row_arrays([[c, -s, o, o], [s, c, o, o], [o, o, i, o], [o, o, o, i]])
}

/// Creates a matrix rotating by `angle` radians about the given axis, which
/// does not need to have unit length.
pub fn rotate<F: Float>(axis: &Vector<F, 3>, angle: F) -> Matrix<F, 4, 4> {
    let [x, y, z] = axis.normalized().into_array();
    let (s, c) = angle.sin_cos();
    let t = F::ONE - c;
    let (o, i) = (F::ZERO, F::ONE);
    Matrix::from_row_arrays([
        [t * x * x + c, t * x * y - s * z, t * x * z + s * y, o],
        [t * x * y + s * z, t * y * y + c, t * y * z - s * x, o],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c, o],
        [o, o, o, i],
    ])
}

/// Creates the rotation matrix of the given (unit) quaternion.
pub fn rotate_quaternion<F: Float>(rotation: &Quaternion<F>) -> Matrix<F, 4, 4> {
    rotation.to_matrix()
}

/// Creates a view matrix for a camera at `eye` looking at `target`, with
/// `up` giving the approximate upward direction.
///
/// # Panics
/// In debug builds, if `up` is parallel to the view direction.
pub fn look_at<F: Float>(
    eye: &Vector<F, 3>,
    target: &Vector<F, 3>,
    up: &Vector<F, 3>,
    coordinate_system: CoordinateSystem,
) -> Matrix<F, 4, 4> {
    let forward = (target - eye).normalized();
    let side = forward.cross(up);
    debug_assert!(
        side.length_squared() > F::EPSILON,
        "look_at up vector {up} is parallel to the view direction"
    );
    let right = side.normalized();
    let camera_up = right.cross(&forward);

    let (right, back) = match coordinate_system {
        CoordinateSystem::RightHanded => (right, -forward),
        CoordinateSystem::LeftHanded => (-right, forward),
    };

    Matrix::from_rows([
        right.extend(-right.dot(eye)),
        camera_up.extend(-camera_up.dot(eye)),
        back.extend(-back.dot(eye)),
        Vector::unit_w(),
    ])
}

/// Creates an OpenGL-style perspective projection matrix with vertical field
/// of view `fov` (in radians). Points at `z = -near` map to normalized
/// device depth `-1` and points at `z = -far` to `1`.
///
/// # Panics
/// In debug builds, if `near` is not positive or `far` is not beyond `near`.
pub fn perspective<F: Float>(fov: F, aspect: F, near: F, far: F) -> Matrix<F, 4, 4> {
    debug_assert!(near > F::ZERO, "perspective near plane {near} must be positive");
    debug_assert!(far > near, "perspective far plane {far} must be beyond near plane {near}");
    debug_assert!(aspect != F::ZERO, "perspective aspect ratio must be non-zero");

    let focal_length = (fov * F::ONE_HALF).tan().recip();
    let depth = far - near;
    let mut m = Matrix::zero();
    m[(0, 0)] = focal_length / aspect;
    m[(1, 1)] = focal_length;
    m[(2, 2)] = -(far + near) / depth;
    m[(2, 3)] = -F::TWO * far * near / depth;
    m[(3, 2)] = F::NEG_ONE;
    m
}

/// Creates an OpenGL-style orthographic projection matrix mapping the given
/// box to the normalized device cube, with `z = -near` going to depth `-1`
/// and `z = -far` to `1`.
///
/// # Panics
/// In debug builds, if any pair of opposite planes coincide.
pub fn orthographic<F: Float>(
    left: F,
    right: F,
    bottom: F,
    top: F,
    near: F,
    far: F,
) -> Matrix<F, 4, 4> {
    debug_assert!(right != left, "orthographic left and right planes coincide");
    debug_assert!(top != bottom, "orthographic bottom and top planes coincide");
    debug_assert!(far != near, "orthographic near and far planes coincide");

    let (width, height, depth) = (right - left, top - bottom, far - near);
    let mut m = Matrix::identity();
    m[(0, 0)] = F::TWO / width;
    m[(1, 1)] = F::TWO / height;
    m[(2, 2)] = -F::TWO / depth;
    m[(0, 3)] = -(right + left) / width;
    m[(1, 3)] = -(top + bottom) / height;
    m[(2, 3)] = -(far + near) / depth;
    m
}

/// The translation part of a 3D homogeneous transform.
pub fn extract_translation<F: Float>(transform: &Matrix<F, 4, 4>) -> Vector<F, 3> {
    transform.column(3).xyz()
}

/// The translation part of a 2D homogeneous transform.
pub fn extract_translation_2d<F: Float>(transform: &Matrix<F, 3, 3>) -> Vector<F, 2> {
    transform.column(2).xy()
}

/// The scale factors of a 3D homogeneous transform, taken as the lengths of
/// the columns of its linear part.
pub fn extract_scale<F: Float>(transform: &Matrix<F, 4, 4>) -> Vector<F, 3> {
    Vector::from_fn(|j| transform.column(j).xyz().length())
}

/// Whether the last row of the matrix is exactly `(0, ..., 0, 1)`.
pub fn is_affine<F: Float, const N: usize>(transform: &Matrix<F, N, N>) -> bool
where
    LaneCount<N>: SupportedLaneCount,
{
    let mut last_row = Vector::zero();
    last_row[N - 1] = F::ONE;
    *transform.row(N - 1) == last_row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        matrix::{Mat3d, Mat4d, Mat4f},
        vector::{Vec2d, Vec3d, Vec3f, Vec4d, Vec4f},
    };
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    fn transform_point(m: &Mat4d, p: &Vec3d) -> Vec3d {
        let h = m * p.extend(1.0);
        h.xyz() / h.w()
    }

    #[test]
    fn translation_moves_points_but_not_directions() {
        let t = translate(&Vec3d::new(1.0, -2.0, 3.0));
        assert_eq!(t * Vec4d::new(0.0, 0.0, 0.0, 1.0), Vec4d::new(1.0, -2.0, 3.0, 1.0));
        assert_eq!(t * Vec4d::new(1.0, 0.0, 0.0, 0.0), Vec4d::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(extract_translation(&t), Vec3d::new(1.0, -2.0, 3.0));
        assert!(is_affine(&t));
    }

    #[test]
    fn translation_in_2d_works() {
        let t = translate_2d(&Vec2d::new(4.0, 5.0));
        assert_eq!(extract_translation_2d(&t), Vec2d::new(4.0, 5.0));
        let p = t * Vec2d::new(1.0, 1.0).extend(1.0);
        assert_eq!(p, Vec3d::new(5.0, 6.0, 1.0));
    }

    #[test]
    fn scaling_works() {
        let s = scale(&Vec3d::new(2.0, 3.0, 4.0));
        assert_eq!(s * Vec4d::new(1.0, 1.0, 1.0, 1.0), Vec4d::new(2.0, 3.0, 4.0, 1.0));
        assert_abs_diff_eq!(extract_scale(&s), Vec3d::new(2.0, 3.0, 4.0));
        assert_eq!(scale_uniform(2.0_f64), scale(&Vec3d::filled(2.0)));
        assert_eq!(scale_2d(&Vec2d::new(2.0, 3.0)), Mat3d::from_diagonal(&Vec3d::new(2.0, 3.0, 1.0)));
    }

    #[test]
    fn rotating_in_2d_turns_counterclockwise() {
        let r = rotate_2d(FRAC_PI_2);
        assert_abs_diff_eq!(r * Vec3d::new(1.0, 0.0, 1.0), Vec3d::new(0.0, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn axis_rotations_follow_right_hand_rule() {
        let x = Vec4d::unit_x();
        let y = Vec4d::unit_y();
        let z = Vec4d::unit_z();
        assert_abs_diff_eq!(rotate_x(FRAC_PI_2) * y, z, epsilon = 1e-12);
        assert_abs_diff_eq!(rotate_y(FRAC_PI_2) * z, x, epsilon = 1e-12);
        assert_abs_diff_eq!(rotate_z(FRAC_PI_2) * x, y, epsilon = 1e-12);
    }

    #[test]
    fn axis_angle_rotation_agrees_with_axis_rotations_and_quaternions() {
        assert_abs_diff_eq!(rotate(&Vec3d::unit_x(), 0.4), rotate_x(0.4), epsilon = 1e-12);
        assert_abs_diff_eq!(rotate(&Vec3d::new(0.0, 2.0, 0.0), 0.4), rotate_y(0.4), epsilon = 1e-12);

        let axis = Vec3d::new(1.0, 1.0, -0.5);
        let q = Quaternion::from_axis_angle(&axis.normalized(), FRAC_PI_3);
        assert_abs_diff_eq!(rotate(&axis, FRAC_PI_3), rotate_quaternion(&q), epsilon = 1e-12);
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let (near, far) = (0.1, 100.0);
        let p = perspective(FRAC_PI_3, 16.0 / 9.0, near, far);
        let ndc = transform_point(&p, &Vec3d::new(0.0, 0.0, -near));
        assert_abs_diff_eq!(ndc.z(), -1.0, epsilon = 1e-9);
        let ndc = transform_point(&p, &Vec3d::new(0.0, 0.0, -far));
        assert_abs_diff_eq!(ndc.z(), 1.0, epsilon = 1e-9);
        assert!(!is_affine(&p));
    }

    #[test]
    fn perspective_single_precision_maps_near_plane_to_minus_one() {
        let p = perspective(1.0_f32, 1.5, 0.5, 50.0);
        let h = p * Vec4f::new(0.0, 0.0, -0.5, 1.0);
        assert_abs_diff_eq!(h.z() / h.w(), -1.0, epsilon = 1e-5);
    }

    #[test]
    fn orthographic_maps_box_to_unit_cube() {
        let o = orthographic(-2.0, 2.0, -1.0, 3.0, 1.0, 11.0);
        assert_abs_diff_eq!(
            transform_point(&o, &Vec3d::new(-2.0, -1.0, -1.0)),
            Vec3d::new(-1.0, -1.0, -1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            transform_point(&o, &Vec3d::new(2.0, 3.0, -11.0)),
            Vec3d::new(1.0, 1.0, 1.0),
            epsilon = 1e-12
        );
        assert!(is_affine(&o));
    }

    #[test]
    fn right_handed_look_at_puts_target_on_negative_z() {
        let eye = Vec3d::new(1.0, 2.0, 3.0);
        let target = Vec3d::new(1.0, 2.0, -7.0);
        let view = look_at(&eye, &target, &Vec3d::unit_y(), CoordinateSystem::RightHanded);
        assert_abs_diff_eq!(transform_point(&view, &eye), Vec3d::zero(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            transform_point(&view, &target),
            Vec3d::new(0.0, 0.0, -10.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            transform_point(&view, &Vec3d::new(1.0, 3.0, 3.0)),
            Vec3d::new(0.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn left_handed_look_at_puts_target_on_positive_z() {
        let eye = Vec3d::zero();
        let target = Vec3d::new(0.0, 0.0, 5.0);
        let view = look_at(&eye, &target, &Vec3d::unit_y(), CoordinateSystem::LeftHanded);
        assert_abs_diff_eq!(
            transform_point(&view, &target),
            Vec3d::new(0.0, 0.0, 5.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            transform_point(&view, &Vec3d::unit_x()),
            Vec3d::unit_x(),
            epsilon = 1e-12
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn look_at_with_up_along_view_direction_panics() {
        look_at(
            &Vec3f::zero(),
            &Vec3f::new(0.0, 5.0, 0.0),
            &Vec3f::unit_y(),
            CoordinateSystem::RightHanded,
        );
    }

    #[test]
    fn composed_transform_inverts_to_identity() {
        let world: Mat4f = translate(&Vec3f::new(1.0, 2.0, 3.0))
            * rotate_y(0.5)
            * scale(&Vec3f::new(2.0, 2.0, 2.0));
        assert_abs_diff_eq!(world * world.inverse(), Mat4f::identity(), epsilon = 1e-5);
        assert!(is_affine(&world));
    }
}
