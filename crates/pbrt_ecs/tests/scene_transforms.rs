use approx::assert_abs_diff_eq;
use pbrt_ecs::{Scene, TransformComponent};
use pbrt_math::{Mat4f, Quatf, Vec3f, transform};
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Velocity(Vec3f);

#[test]
fn moving_entities_through_views_updates_their_world_matrices() {
    let mut scene = Scene::new();
    let moving = scene.create_entity();
    let still = scene.create_entity();

    scene
        .add_component(moving, TransformComponent::default())
        .unwrap();
    scene
        .add_component(moving, Velocity(Vec3f::new(1.0, 0.0, -2.0)))
        .unwrap();
    scene
        .add_component(still, TransformComponent::from_position(Vec3f::unit_y()))
        .unwrap();

    let velocities: Vec<_> = scene
        .view2::<TransformComponent, Velocity>()
        .map(|(entity, _, velocity)| (entity, *velocity))
        .collect();
    assert_eq!(velocities.len(), 1);

    for (entity, Velocity(velocity)) in velocities {
        let transform = scene
            .get_component_mut::<TransformComponent>(entity)
            .unwrap();
        let position = *transform.position() + velocity;
        transform.set_position(position);
    }

    let moved = scene
        .get_component_mut::<TransformComponent>(moving)
        .unwrap();
    assert_eq!(
        transform::extract_translation(moved.world_matrix()),
        Vec3f::new(1.0, 0.0, -2.0)
    );

    let unmoved = scene.get_component_mut::<TransformComponent>(still).unwrap();
    assert_eq!(unmoved.generation(), 0);
    assert_eq!(
        transform::extract_translation(unmoved.world_matrix()),
        Vec3f::unit_y()
    );
}

#[test]
fn transforms_can_be_rotated_in_place_through_mutable_view() {
    let mut scene = Scene::new();
    let entities: Vec<_> = (0..4).map(|_| scene.create_entity()).collect();
    for &entity in &entities {
        scene
            .add_component(entity, TransformComponent::default())
            .unwrap();
    }

    for (_, transform) in scene.view_mut::<TransformComponent>() {
        transform.set_rotation(Quatf::from_axis_angle(&Vec3f::unit_y(), FRAC_PI_2));
    }

    for &entity in &entities {
        let transform = scene
            .get_component_mut::<TransformComponent>(entity)
            .unwrap();
        assert_abs_diff_eq!(transform.forward(), Vec3f::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        let world = *transform.world_matrix();
        let inverse_world = *transform.inverse_world_matrix();
        assert_abs_diff_eq!(world * inverse_world, Mat4f::identity(), epsilon = 1e-6);
    }
}

#[test]
fn destroying_entity_drops_its_transform() {
    let mut scene = Scene::new();
    let entity = scene.create_entity();
    scene
        .add_component(entity, TransformComponent::default())
        .unwrap();
    assert_eq!(scene.component_count::<TransformComponent>(), 1);

    scene.destroy_entity(entity).unwrap();
    assert_eq!(scene.component_count::<TransformComponent>(), 0);
    assert!(scene.get_component::<TransformComponent>(entity).is_err());

    let reused = scene.create_entity();
    assert_eq!(reused.index(), entity.index());
    assert!(!scene.has_component::<TransformComponent>(reused));
}
