use crate::vector::{Vec3f, Vec3i, Vec4d, Vec4f, Vector};
use pbrt_profiling::benchmark::Benchmarker;

pub fn add_vector3f(benchmarker: impl Benchmarker) {
    let a = create_vector3f();
    let b = create_vector3f();
    benchmarker.benchmark(&mut || a + b);
}

pub fn add_vector4f(benchmarker: impl Benchmarker) {
    let a = create_vector4f();
    let b = create_vector4f();
    benchmarker.benchmark(&mut || a + b);
}

pub fn add_vector8f(benchmarker: impl Benchmarker) {
    let a = create_vector8f();
    let b = create_vector8f();
    benchmarker.benchmark(&mut || a + b);
}

pub fn add_vector4d(benchmarker: impl Benchmarker) {
    let a = Vec4d::new(1.0, 2.0, 3.0, 4.0);
    let b = Vec4d::new(-0.5, 0.25, 8.0, 1.5);
    benchmarker.benchmark(&mut || a + b);
}

pub fn add_vector3i(benchmarker: impl Benchmarker) {
    let a = Vec3i::new(1, 2, 3);
    let b = Vec3i::new(-4, 5, 6);
    benchmarker.benchmark(&mut || a + b);
}

pub fn dot_vector4f(benchmarker: impl Benchmarker) {
    let a = create_vector4f();
    let b = create_vector4f();
    benchmarker.benchmark(&mut || a.dot(&b));
}

pub fn dot_vector8f(benchmarker: impl Benchmarker) {
    let a = create_vector8f();
    let b = create_vector8f();
    benchmarker.benchmark(&mut || a.dot(&b));
}

pub fn normalize_vector3f(benchmarker: impl Benchmarker) {
    let a = create_vector3f();
    benchmarker.benchmark(&mut || a.normalized());
}

pub fn normalize_vector4f(benchmarker: impl Benchmarker) {
    let a = create_vector4f();
    benchmarker.benchmark(&mut || a.normalized());
}

pub fn fast_normalize_vector4f(benchmarker: impl Benchmarker) {
    let a = create_vector4f();
    benchmarker.benchmark(&mut || a.fast_normalized());
}

pub fn safe_divide_vector4f(benchmarker: impl Benchmarker) {
    let a = create_vector4f();
    let b = Vec4f::new(2.0, 0.0, -1.0, 0.0);
    benchmarker.benchmark(&mut || a / b);
}

fn create_vector3f() -> Vec3f {
    Vec3f::new(1.0, -2.0, 3.5)
}

fn create_vector4f() -> Vec4f {
    Vec4f::new(1.0, -2.0, 3.5, 0.25)
}

fn create_vector8f() -> Vector<f32, 8> {
    Vector::from_fn(|i| i as f32 * 0.5 - 1.0)
}
