use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{insert_time_with_delta, run_system_once};

fn world_with_camera(at: Vec2) -> (World, Entity) {
    let mut world = World::new();
    world.init_resource::<FollowTarget>();
    insert_time_with_delta(&mut world, Duration::from_millis(16));
    let cam = world
        .spawn((MainCamera { responsiveness: 5.0 }, Transform::from_translation(at.extend(999.0))))
        .id();
    (world, cam)
}

#[test]
fn reset_target_snaps_then_eases() {
    let (mut world, cam) = world_with_camera(Vec2::ZERO);
    let player = world.spawn(Transform::from_xyz(300.0, -120.0, 1.0)).id();
    world.resource_mut::<FollowTarget>().reset(player);

    run_system_once(&mut world, follow_target);

    let tf = world.get::<Transform>(cam).unwrap();
    assert_eq!(tf.translation, Vec3::new(300.0, -120.0, 999.0));
    assert!(!world.resource::<FollowTarget>().snap);

    // Player moves; the camera closes part of the gap only.
    world.get_mut::<Transform>(player).unwrap().translation.x = 400.0;
    run_system_once(&mut world, follow_target);
    let x = world.get::<Transform>(cam).unwrap().translation.x;
    assert!(x > 300.0 && x < 400.0, "camera x = {x}");
}

#[test]
fn missing_target_leaves_camera_alone() {
    let (mut world, cam) = world_with_camera(Vec2::new(5.0, 5.0));
    let gone = world.spawn(Transform::default()).id();
    world.resource_mut::<FollowTarget>().reset(gone);
    world.despawn(gone);

    run_system_once(&mut world, follow_target);

    assert_eq!(world.get::<Transform>(cam).unwrap().translation.truncate(), Vec2::new(5.0, 5.0));
    // Still waiting to snap onto the next target.
    assert!(world.resource::<FollowTarget>().snap);
}

#[test]
fn ease_converges_without_overshoot() {
    let mut p = Vec2::ZERO;
    let goal = Vec2::new(100.0, 50.0);
    for _ in 0..600 {
        p = ease_toward(p, goal, 5.0, 1.0 / 60.0);
        assert!(p.x <= goal.x && p.y <= goal.y);
    }
    assert!(p.distance(goal) < 0.01);
}

#[test]
fn overlay_tracks_fade_alpha() {
    let mut world = World::new();
    let mut fade = ScreenFade::default();
    fade.begin_out(Duration::from_millis(100));
    fade.tick(Duration::from_millis(50));
    world.insert_resource(fade);
    let overlay = world
        .spawn((FadeOverlay, BackgroundColor(Color::BLACK.with_alpha(0.0))))
        .id();

    run_system_once(&mut world, draw_fade);

    let alpha = world.get::<BackgroundColor>(overlay).unwrap().0.alpha();
    assert!((alpha - 0.5).abs() < 1e-4, "alpha = {alpha}");
}
