use crate::{
    matrix::{Mat3f, Mat4d, Mat4f, Matrix},
    transform,
    vector::{Vec3f, Vec4f},
};
use pbrt_profiling::benchmark::Benchmarker;

pub fn mul_matrix3f(benchmarker: impl Benchmarker) {
    let a = create_matrix3f();
    let b = create_matrix3f().transpose();
    benchmarker.benchmark(&mut || a * b);
}

pub fn mul_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_matrix4f();
    let b = create_matrix4f().transpose();
    benchmarker.benchmark(&mut || a * b);
}

pub fn mul_matrix4d(benchmarker: impl Benchmarker) {
    let a: Mat4d = Matrix::from_fn(|i, j| (i * 4 + j) as f64 * 0.25);
    let b = a.transpose();
    benchmarker.benchmark(&mut || a * b);
}

pub fn mul_matrix8f(benchmarker: impl Benchmarker) {
    let a: Matrix<f32, 8, 8> = Matrix::from_fn(|i, j| (i + 2 * j) as f32 * 0.1);
    let b = a.transpose();
    benchmarker.benchmark(&mut || a * b);
}

pub fn mul_matrix64f_naive(benchmarker: impl Benchmarker) {
    let a = create_matrix64f();
    let b = create_matrix64f().transpose();
    benchmarker.benchmark(&mut || a.mul_naive(&b));
}

pub fn mul_matrix64f_blocked(benchmarker: impl Benchmarker) {
    let a = create_matrix64f();
    let b = create_matrix64f().transpose();
    benchmarker.benchmark(&mut || a.mul_blocked(&b));
}

pub fn mul_vector_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_matrix4f();
    let v = Vec4f::new(1.0, 2.0, 3.0, 1.0);
    benchmarker.benchmark(&mut || a * v);
}

pub fn transpose_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_matrix4f();
    benchmarker.benchmark(&mut || a.transpose());
}

pub fn inverse_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_matrix4f();
    benchmarker.benchmark(&mut || a.inverse());
}

pub fn inverse_matrix6d(benchmarker: impl Benchmarker) {
    let a: Matrix<f64, 6, 6> =
        Matrix::from_fn(|i, j| if i == j { 4.0 } else { 1.0 / (1 + i + j) as f64 });
    benchmarker.benchmark(&mut || a.inverse());
}

pub fn determinant_matrix4f(benchmarker: impl Benchmarker) {
    let a = create_matrix4f();
    benchmarker.benchmark(&mut || a.determinant());
}

fn create_matrix3f() -> Mat3f {
    Mat3f::from_row_arrays([[2.0, 1.0, 0.0], [0.5, 3.0, -1.0], [0.0, 1.0, 4.0]])
}

fn create_matrix4f() -> Mat4f {
    transform::translate(&Vec3f::new(1.0, 2.0, 3.0))
        * transform::rotate(&Vec3f::new(1.0, 1.0, 0.0), 0.7)
        * transform::scale(&Vec3f::new(2.0, 0.5, 1.5))
}

fn create_matrix64f() -> Matrix<f32, 64, 64> {
    Matrix::from_fn(|i, j| ((i * 7 + j * 3) % 11) as f32 * 0.1)
}
