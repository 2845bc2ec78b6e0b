use pbrt_math::benchmark::benchmarks::vector;
use pbrt_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(vector, add_vector3f);
define_criterion_target!(vector, add_vector4f);
define_criterion_target!(vector, add_vector8f);
define_criterion_target!(vector, add_vector4d);
define_criterion_target!(vector, add_vector3i);
define_criterion_target!(vector, dot_vector4f);
define_criterion_target!(vector, dot_vector8f);
define_criterion_target!(vector, normalize_vector3f);
define_criterion_target!(vector, normalize_vector4f);
define_criterion_target!(vector, fast_normalize_vector4f);
define_criterion_target!(vector, safe_divide_vector4f);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets =
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
);
criterion::criterion_main!(benches);
