use pbrt_math::benchmark::benchmarks::quaternion;
use pbrt_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(quaternion, mul_quaternionf);
define_criterion_target!(quaternion, rotate_vector3f);
define_criterion_target!(quaternion, normalize_quaternionf);
define_criterion_target!(quaternion, slerp_quaternionf);
define_criterion_target!(quaternion, quaternion_to_matrix4f);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets =
        mul_quaternionf,
        rotate_vector3f,
        normalize_quaternionf,
        slerp_quaternionf,
        quaternion_to_matrix4f,
);
criterion::criterion_main!(benches);
