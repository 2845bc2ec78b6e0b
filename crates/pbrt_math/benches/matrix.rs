use pbrt_math::benchmark::benchmarks::matrix;
use pbrt_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(matrix, mul_matrix3f);
define_criterion_target!(matrix, mul_matrix4f);
define_criterion_target!(matrix, mul_matrix4d);
define_criterion_target!(matrix, mul_matrix8f);
define_criterion_target!(matrix, mul_matrix64f_naive, 20);
define_criterion_target!(matrix, mul_matrix64f_blocked, 20);
define_criterion_target!(matrix, mul_vector_matrix4f);
define_criterion_target!(matrix, transpose_matrix4f);
define_criterion_target!(matrix, inverse_matrix4f);
define_criterion_target!(matrix, inverse_matrix6d);
define_criterion_target!(matrix, determinant_matrix4f);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets =
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
);
criterion::criterion_main!(benches);
