//! End-to-end controller behavior: binding lifecycle across mode
//! switches, activity gating, and the per-mode scenarios driven through
//! the real action registry and entity world.

use std::cell::RefCell;
use std::rc::Rc;

use aperture_camera::{CameraController, CameraMode, binding_set};
use aperture_input::{ActionEvent, ActionKind, ActionRegistry};
use aperture_scene::{WorldTransform, spawn_object};
use bevy_ecs::world::World;
use glam::Vec3;

fn setup() -> (Rc<RefCell<ActionRegistry>>, CameraController, World) {
    let registry = Rc::new(RefCell::new(ActionRegistry::new()));
    let controller = CameraController::new(Rc::clone(&registry));
    (registry, controller, World::new())
}

fn dispatch(registry: &Rc<RefCell<ActionRegistry>>, kind: ActionKind, event: ActionEvent) {
    registry.borrow_mut().dispatch(kind, event);
}

#[test]
fn test_exactly_the_active_modes_bindings_are_live() {
    let (registry, mut controller, _world) = setup();

    for mode in [
        CameraMode::ThirdPerson,
        CameraMode::Viewer,
        CameraMode::Static,
        CameraMode::FirstPerson,
        CameraMode::Free,
    ] {
        controller.set_camera_mode(mode);
        assert_eq!(
            registry.borrow().live_count(),
            binding_set(mode).len(),
            "mode {mode:?} must own exactly its declared binding set"
        );
    }
}

#[test]
fn test_shared_wheel_action_never_double_handled() {
    let (registry, mut controller, world) = setup();

    // ThirdPerson and Viewer both bind Wheel. After switching, a wheel
    // event must reach only the viewer block.
    controller.set_camera_mode(CameraMode::ThirdPerson);
    controller.set_camera_mode(CameraMode::Viewer);

    let zoom_exponent_before = controller.settings().third_person.zoom_exponent;
    dispatch(&registry, ActionKind::Wheel, ActionEvent::analog(2.0));
    controller.on_update(0.016, &world);

    assert!(
        (controller.settings().third_person.zoom_exponent - zoom_exponent_before).abs() < 1e-6,
        "third-person block must not see wheel input after the switch"
    );
    assert!(controller.settings().viewer.zoom > 0.0);
}

#[test]
fn test_repeated_set_mode_keeps_single_binding_copy() {
    let (registry, mut controller, _world) = setup();

    controller.set_camera_mode(CameraMode::Viewer);
    controller.set_camera_mode(CameraMode::Viewer);
    controller.set_camera_mode(CameraMode::Viewer);

    assert_eq!(
        registry.borrow().live_count(),
        binding_set(CameraMode::Viewer).len()
    );
}

#[test]
fn test_inactive_controller_freezes_view_transform() {
    let (registry, mut controller, world) = setup();

    dispatch(&registry, ActionKind::MoveForward, ActionEvent::analog(1.0));
    controller.on_update(1.0, &world);
    let frozen = controller.view_matrix();

    controller.set_active(false);
    for _ in 0..5 {
        dispatch(&registry, ActionKind::MoveForward, ActionEvent::analog(1.0));
        dispatch(
            &registry,
            ActionKind::LookHorizontal,
            ActionEvent::analog(50.0),
        );
        controller.on_update(1.0, &world);
    }
    assert_eq!(
        controller.view_matrix().to_cols_array(),
        frozen.to_cols_array(),
        "no tick may move the view transform while inactive"
    );

    // Reactivation resumes updates on the next tick.
    controller.set_active(true);
    controller.on_update(1.0, &world);
    assert_ne!(
        controller.view_matrix().to_cols_array(),
        frozen.to_cols_array()
    );
}

#[test]
fn test_free_mode_move_scenario() {
    let (registry, mut controller, world) = setup();

    // Forward input of magnitude 1 for dt = 1 at multiplier 2 advances
    // two units along the current forward vector.
    controller.set_debug_move_speed(2.0);
    let forward = controller.pose().forward;
    let start = controller.pose().position;

    dispatch(&registry, ActionKind::MoveForward, ActionEvent::analog(1.0));
    controller.on_update(1.0, &world);

    let moved = controller.pose().position - start;
    assert!((moved - forward * 2.0).length() < 1e-5);
}

#[test]
fn test_first_person_invalid_reference_holds_position() {
    let (registry, mut controller, mut world) = setup();

    let entity = spawn_object(&mut world, Vec3::new(4.0, 0.0, 4.0));
    controller.set_camera_mode(CameraMode::FirstPerson);
    controller.follow_entity(Some(entity));
    controller.on_update(0.016, &world);
    let attached = controller.pose().position;

    assert!(world.despawn(entity));

    let forward_before = controller.pose().forward;
    for _ in 0..10 {
        dispatch(
            &registry,
            ActionKind::LookHorizontal,
            ActionEvent::analog(30.0),
        );
        controller.on_update(0.016, &world);
        assert!(
            (controller.pose().position - attached).length() < 1e-6,
            "position must hold at the last valid value"
        );
    }
    assert!(
        (controller.pose().forward - forward_before).length() > 1e-3,
        "orientation still follows look input"
    );
}

#[test]
fn test_first_person_tracks_moving_entity() {
    let (_registry, mut controller, mut world) = setup();

    let entity = spawn_object(&mut world, Vec3::ZERO);
    controller.set_camera_mode(CameraMode::FirstPerson);
    controller.follow_entity(Some(entity));

    world
        .get_mut::<WorldTransform>(entity)
        .expect("live entity")
        .position = Vec3::new(0.0, 0.0, -7.0);
    controller.on_update(0.016, &world);

    let eye = controller.settings().first_person.eye_height;
    let expected = Vec3::new(0.0, eye, -7.0);
    assert!((controller.pose().position - expected).length() < 1e-5);
}

#[test]
fn test_third_person_level_orbit_scenario() {
    let (_registry, mut controller, mut world) = setup();

    let entity = spawn_object(&mut world, Vec3::ZERO);
    controller.set_camera_mode(CameraMode::ThirdPerson);
    controller.follow_entity(Some(entity));
    {
        let third = &mut controller.settings_mut().third_person;
        third.pitch = 0.0;
        third.camera_elevation = 0.0;
        third.zoom_exponent = 0.0;
        third.current_look_at = Vec3::ZERO;
    }
    let distance = controller.settings().third_person.orbit_distance();

    controller.on_update(0.016, &world);

    let pose = controller.pose();
    assert!((pose.position.length() - distance).abs() < 1e-4);
    assert!(pose.position.y.abs() < 1e-5, "level orbit stays in the horizontal plane");
    let to_origin = (-pose.position).normalize();
    assert!(pose.forward.dot(to_origin) > 0.9999, "camera looks toward the origin");
}

#[test]
fn test_third_person_freezes_when_followed_entity_despawns() {
    let (_registry, mut controller, mut world) = setup();

    let entity = spawn_object(&mut world, Vec3::new(6.0, 0.0, 0.0));
    controller.set_camera_mode(CameraMode::ThirdPerson);
    controller.follow_entity(Some(entity));
    for _ in 0..300 {
        controller.on_update(0.016, &world);
    }
    let converged = controller.settings().third_person.current_look_at;
    assert!((converged - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-2);

    assert!(world.despawn(entity));
    for _ in 0..20 {
        controller.on_update(0.016, &world);
    }
    assert!(
        (controller.settings().third_person.current_look_at - converged).length() < 1e-6,
        "look-at must freeze at its last value"
    );
}

#[test]
fn test_input_bursts_between_ticks_apply_once() {
    let (registry, mut controller, world) = setup();
    controller.set_camera_mode(CameraMode::ThirdPerson);

    // Three wheel events between ticks accumulate additively and are
    // consumed by the single next update.
    for _ in 0..3 {
        dispatch(&registry, ActionKind::Wheel, ActionEvent::analog(-1.0));
    }
    controller.on_update(0.016, &world);
    let exponent = controller.settings().third_person.zoom_exponent;
    assert!((exponent - 3.0).abs() < 1e-6);

    // A tick without fresh events leaves the accumulated value alone.
    controller.on_update(0.016, &world);
    assert!((controller.settings().third_person.zoom_exponent - exponent).abs() < 1e-6);
}

#[test]
fn test_viewer_settings_persist_across_detour() {
    let (registry, mut controller, world) = setup();

    controller.set_camera_mode(CameraMode::Viewer);
    dispatch(&registry, ActionKind::Wheel, ActionEvent::analog(3.0));
    controller.on_update(0.016, &world);
    let zoom = controller.settings().viewer.zoom;
    assert!(zoom > 0.0);

    controller.set_camera_mode(CameraMode::Free);
    controller.on_update(0.016, &world);
    controller.set_camera_mode(CameraMode::Viewer);

    assert!((controller.settings().viewer.zoom - zoom).abs() < 1e-6);
}

#[test]
fn test_set_transforms_bypasses_active_updater() {
    let (_registry, mut controller, _world) = setup();

    controller.set_camera_mode(CameraMode::Static);
    controller.set_transforms(Vec3::new(-3.0, 8.0, 1.0), 1.0, 0.25);

    let pose = controller.pose();
    assert!((pose.position - Vec3::new(-3.0, 8.0, 1.0)).length() < 1e-6);
    // The static block now serves the overridden pose on later ticks.
    let world = World::new();
    controller.on_update(0.016, &world);
    assert!((controller.pose().position - Vec3::new(-3.0, 8.0, 1.0)).length() < 1e-6);
}
