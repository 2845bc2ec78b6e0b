//! Position, orientation and scale of an entity.

use pbrt_math::{Mat4f, Quatf, Vec3f, transform};

/// Position, rotation and scale of an entity, with lazily computed world
/// matrices.
///
/// Every setter advances a generation counter. Cached matrices remember the
/// generation they were computed at and are recomputed on the next read when
/// the counter has moved on.
#[derive(Clone, Debug)]
pub struct TransformComponent {
    position: Vec3f,
    rotation: Quatf,
    scale: Vec3f,
    generation: u64,
    rotation_generation: u64,
    world: Cached<WorldMatrices>,
    rotation_matrix: Cached<Mat4f>,
}

#[derive(Clone, Copy, Debug)]
struct WorldMatrices {
    world: Mat4f,
    inverse_world: Mat4f,
}

#[derive(Clone, Copy, Debug)]
struct Cached<T> {
    value: T,
    generation: Option<u64>,
}

impl<T> Cached<T> {
    const fn empty(placeholder: T) -> Self {
        Self {
            value: placeholder,
            generation: None,
        }
    }

    fn get_or_update(&mut self, generation: u64, compute: impl FnOnce() -> T) -> &T {
        if self.generation != Some(generation) {
            self.value = compute();
            self.generation = Some(generation);
        }
        &self.value
    }
}

impl TransformComponent {
    /// Creates a transform with the given position, rotation and scale. The
    /// rotation is normalized.
    pub fn new(position: Vec3f, rotation: Quatf, scale: Vec3f) -> Self {
        Self {
            position,
            rotation: rotation.normalized(),
            scale,
            generation: 0,
            rotation_generation: 0,
            world: Cached::empty(WorldMatrices {
                world: Mat4f::identity(),
                inverse_world: Mat4f::identity(),
            }),
            rotation_matrix: Cached::empty(Mat4f::identity()),
        }
    }

    /// Creates an unrotated, unscaled transform at the given position.
    pub fn from_position(position: Vec3f) -> Self {
        Self::new(position, Quatf::identity(), Vec3f::one())
    }

    pub fn position(&self) -> &Vec3f {
        &self.position
    }

    pub fn rotation(&self) -> &Quatf {
        &self.rotation
    }

    pub fn scale(&self) -> &Vec3f {
        &self.scale
    }

    /// Counter advanced by every change to the transform.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_position(&mut self, position: Vec3f) {
        self.position = position;
        self.generation += 1;
    }

    /// Sets the rotation, normalizing it.
    pub fn set_rotation(&mut self, rotation: Quatf) {
        self.rotation = rotation.normalized();
        self.generation += 1;
        self.rotation_generation += 1;
    }

    pub fn set_scale(&mut self, scale: Vec3f) {
        self.scale = scale;
        self.generation += 1;
    }

    /// Returns the matrix taking points from the entity's local space to
    /// world space: translation after rotation after scaling.
    pub fn world_matrix(&mut self) -> &Mat4f {
        &self.world_matrices().world
    }

    pub fn inverse_world_matrix(&mut self) -> &Mat4f {
        &self.world_matrices().inverse_world
    }

    /// Returns the 4x4 rotation matrix of the current rotation.
    pub fn rotation_matrix(&mut self) -> &Mat4f {
        let rotation = self.rotation;
        self.rotation_matrix
            .get_or_update(self.rotation_generation, || {
                transform::rotate_quaternion(&rotation)
            })
    }

    /// Direction the entity faces: the negative local z-axis in world space.
    pub fn forward(&mut self) -> Vec3f {
        -self.rotation_matrix().row(2).xyz()
    }

    /// The local x-axis in world space.
    pub fn right(&mut self) -> Vec3f {
        self.rotation_matrix().row(0).xyz()
    }

    /// The local y-axis in world space.
    pub fn up(&mut self) -> Vec3f {
        self.rotation_matrix().row(1).xyz()
    }

    fn world_matrices(&mut self) -> &WorldMatrices {
        let (position, rotation, scale) = (self.position, self.rotation, self.scale);
        self.world.get_or_update(self.generation, || {
            let world = transform::translate(&position)
                * transform::rotate_quaternion(&rotation)
                * transform::scale(&scale);
            WorldMatrices {
                world,
                inverse_world: world.inverse(),
            }
        })
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec3f::zero(), Quatf::identity(), Vec3f::one())
    }
}
