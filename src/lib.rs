//! Small-object numerics with scalar and SIMD kernels, together with the
//! scene, logging and profiling glue built on them.

pub use pbrt_ecs as ecs;
pub use pbrt_log as log;
pub use pbrt_log::{pbrt_assert, pbrt_assert_msg};
pub use pbrt_math as math;
pub use pbrt_profiling as profiling;
