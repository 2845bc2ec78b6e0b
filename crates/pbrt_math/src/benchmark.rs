pub mod benchmarks;

pbrt_profiling::define_target_enum! {
    Target,
    crate::benchmark::benchmarks,
    vector => {
        add_vector3f,
        add_vector4f,
        add_vector8f,
        add_vector4d,
        add_vector3i,
        dot_vector4f,
        dot_vector8f,
        normalize_vector3f,
        normalize_vector4f,
        fast_normalize_vector4f,
        safe_divide_vector4f,
    },
    matrix => {
        mul_matrix3f,
        mul_matrix4f,
        mul_matrix4d,
        mul_matrix8f,
        mul_matrix64f_naive,
        mul_matrix64f_blocked,
        mul_vector_matrix4f,
        transpose_matrix4f,
        inverse_matrix4f,
        inverse_matrix6d,
        determinant_matrix4f,
    },
    quaternion => {
        mul_quaternionf,
        rotate_vector3f,
        normalize_quaternionf,
        slerp_quaternionf,
        quaternion_to_matrix4f,
    }
}

pub fn benchmark(target: Target, duration: f64, delay: f64) {
    pbrt_profiling::benchmark::benchmark(
        |benchmarker| target.execute(benchmarker),
        duration,
        delay,
    );
}
