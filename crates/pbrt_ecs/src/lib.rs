//! Entity/component scene registry.

pub mod components;
pub mod scene;
mod storage;

pub use components::TransformComponent;
pub use scene::{Component, Entity, Scene};
