//! Components provided with the scene.

pub mod transform;

pub use transform::TransformComponent;
