//! Math utilities.

#[macro_use]
mod macros;

#[cfg(feature = "benchmark")]
pub mod benchmark;
pub mod consts;
pub(crate) mod kernel;
pub mod matrix;
pub mod num;
pub mod quaternion;
pub mod simd;
pub mod storage;
pub mod transform;
pub mod vector;

pub use matrix::{Mat2d, Mat2f, Mat3d, Mat3f, Mat4d, Mat4f, Matrix};
pub use num::{Float, Scalar};
pub use quaternion::{Quatd, Quatf, Quaternion};
pub use storage::{LaneCount, SupportedLaneCount};
pub use transform::CoordinateSystem;
pub use vector::{
    Vec2d, Vec2f, Vec2i, Vec2u, Vec3d, Vec3f, Vec3i, Vec3u, Vec4d, Vec4f, Vec4i, Vec4u, Vector,
};
