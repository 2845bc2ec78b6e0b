use crate::{quaternion::Quatf, vector::Vec3f};
use pbrt_profiling::benchmark::Benchmarker;

pub fn mul_quaternionf(benchmarker: impl Benchmarker) {
    let a = create_quaternionf();
    let b = Quatf::from_axis_angle(&Vec3f::unit_z(), 1.2);
    benchmarker.benchmark(&mut || a * b);
}

pub fn rotate_vector3f(benchmarker: impl Benchmarker) {
    let a = create_quaternionf();
    let v = Vec3f::new(1.0, -2.0, 0.5);
    benchmarker.benchmark(&mut || a.rotate(&v));
}

pub fn normalize_quaternionf(benchmarker: impl Benchmarker) {
    let a = Quatf::new(1.0, 2.0, 3.0, 4.0);
    benchmarker.benchmark(&mut || a.normalized());
}

pub fn slerp_quaternionf(benchmarker: impl Benchmarker) {
    let a = create_quaternionf();
    let b = Quatf::from_axis_angle(&Vec3f::unit_y(), -0.8);
    benchmarker.benchmark(&mut || a.slerp(&b, 0.3));
}

pub fn quaternion_to_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_quaternionf();
    benchmarker.benchmark(&mut || a.to_matrix());
}

fn create_quaternionf() -> Quatf {
    Quatf::from_axis_angle(&Vec3f::new(1.0, 2.0, 3.0).normalized(), 0.9)
}
