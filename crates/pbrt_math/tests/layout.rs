use pbrt_math::{
    Mat2d, Mat3f, Mat4d, Mat4f, Matrix, Quatd, Quatf, Vec2d, Vec2f, Vec3d, Vec3f, Vec4d, Vec4f,
    Vec4i, Vector,
};

fn is_aligned<T>(value: &T, alignment: usize) -> bool {
    (value as *const T as usize) % alignment == 0
}

#[test]
fn declared_alignment_is_type_alignment() {
    assert_eq!(align_of::<Vec2f>(), Vec2f::ALIGNMENT);
    assert_eq!(align_of::<Vec3f>(), Vec3f::ALIGNMENT);
    assert_eq!(align_of::<Vec4f>(), Vec4f::ALIGNMENT);
    assert_eq!(align_of::<Vector<f32, 8>>(), Vector::<f32, 8>::ALIGNMENT);
    assert_eq!(align_of::<Vec2d>(), Vec2d::ALIGNMENT);
    assert_eq!(align_of::<Vec3d>(), Vec3d::ALIGNMENT);
    assert_eq!(align_of::<Vec4d>(), Vec4d::ALIGNMENT);
    assert_eq!(align_of::<Vec4i>(), Vec4i::ALIGNMENT);
    assert_eq!(align_of::<Mat4f>(), Mat4f::ALIGNMENT);
    assert_eq!(align_of::<Mat4d>(), Mat4d::ALIGNMENT);
    assert_eq!(align_of::<Mat3f>(), Mat3f::ALIGNMENT);
}

#[test]
fn register_eligible_types_have_register_alignment() {
    assert_eq!(align_of::<Vec4f>(), 16);
    assert_eq!(align_of::<Vector<f32, 8>>(), 32);
    assert_eq!(align_of::<Vec2d>(), 16);
    assert_eq!(align_of::<Vec4d>(), 32);
    assert_eq!(align_of::<Mat4f>(), 16);
    assert_eq!(align_of::<Mat4d>(), 32);
    assert_eq!(align_of::<Mat2d>(), 16);
    assert_eq!(align_of::<Quatf>(), 16);
    assert_eq!(align_of::<Quatd>(), 32);
}

#[test]
fn other_types_keep_element_alignment_and_packed_size() {
    assert_eq!(align_of::<Vec3f>(), align_of::<f32>());
    assert_eq!(align_of::<Vector<i32, 4>>(), align_of::<i32>());
    assert_eq!(align_of::<Vector<f64, 8>>(), align_of::<f64>());
    assert_eq!(align_of::<Matrix<f64, 3, 3>>(), align_of::<f64>());
    assert_eq!(size_of::<Vec3f>(), 3 * size_of::<f32>());
    assert_eq!(size_of::<Matrix<f32, 3, 5>>(), 15 * size_of::<f32>());
}

#[test]
fn values_in_collections_stay_aligned() {
    let vectors = vec![Vec4d::filled(1.0); 5];
    assert!(vectors.iter().all(|v| is_aligned(v, 32)));

    let matrices = [Mat4f::identity(); 3];
    assert!(matrices.iter().all(|m| is_aligned(m, 16)));
    assert!(matrices.iter().all(|m| m.rows().iter().all(|row| is_aligned(row, 16))));

    let bytes: &[u8] = bytemuck::bytes_of(&matrices[0]);
    assert_eq!(bytes.len(), 64);
}
