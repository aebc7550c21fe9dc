use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::common::test_utils::run_system_once;

fn spawn_via_commands(world: &mut World, position: Vec2) -> Entity {
    let tunables = world.resource::<Tunables>().clone();
    let mut queue = CommandQueue::default();
    let e = world.resource_scope(|world, mut deferred: Mut<DeferredEffects>| {
        let mut commands = Commands::new(&mut queue, world);
        spawn_enemy(&mut commands, &mut deferred, position, &tunables)
    });
    queue.apply(world);
    e
}

fn world_with_resources() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<DeferredEffects>();
    world.init_resource::<Messages<TimerFired>>();
    world
}

/// Advance the clock and hand whatever fired to the wander system.
fn elapse(world: &mut World, dt: Duration) {
    let fired = world.resource_mut::<DeferredEffects>().advance(dt);
    world.write_message_batch(fired);
    run_system_once(world, wander);
    world.resource_mut::<Messages<TimerFired>>().clear();
}

#[test]
fn spawned_enemy_has_full_health_and_an_armed_wander() {
    let mut world = world_with_resources();
    let e = spawn_via_commands(&mut world, Vec2::new(96.0, 32.0));

    assert_eq!(world.get::<Health>(e).unwrap().hp, 3);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);

    let wander = world.get::<Wander>(e).unwrap().handle;
    assert!(world.resource::<DeferredEffects>().is_pending(wander));
    assert_eq!(world.resource::<DeferredEffects>().len(), 1);
}

#[test]
fn wander_period_stays_in_range() {
    let tunables = Tunables::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let period = wander_period(&mut rng, &tunables);
        assert!(period >= Duration::from_millis(1000));
        assert!(period <= Duration::from_millis(5000));
    }
}

#[test]
fn wander_velocity_magnitude_per_axis_is_bounded() {
    let tunables = Tunables::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut saw_negative = false;
    let mut saw_positive = false;

    for _ in 0..500 {
        let v = wander_velocity(&mut rng, &tunables);
        for c in [v.x, v.y] {
            assert!((50.0..=100.0).contains(&c.abs()), "component {c} out of range");
            saw_negative |= c < 0.0;
            saw_positive |= c > 0.0;
        }
    }

    assert!(saw_negative && saw_positive);
}

#[test]
fn wander_burst_starts_and_halts() {
    let mut world = world_with_resources();
    let e = world.spawn((Enemy, LinearVelocity::ZERO)).id();
    let handle = world.resource_mut::<DeferredEffects>().schedule_repeating(
        e,
        Duration::from_millis(1000),
        TimedEffect::Wander,
    );
    world.entity_mut(e).insert(Wander { handle });

    elapse(&mut world, Duration::from_millis(1000));
    let v = world.get::<LinearVelocity>(e).unwrap().0;
    assert_ne!(v, Vec2::ZERO);
    // Repeating wander plus the halt for this burst.
    assert_eq!(world.resource::<DeferredEffects>().len(), 2);

    elapse(&mut world, Duration::from_millis(500));
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
    assert_eq!(world.resource::<DeferredEffects>().len(), 1);
}

#[test]
fn wander_for_missing_owner_is_ignored() {
    let mut world = world_with_resources();
    let gone = world.spawn((Enemy, LinearVelocity::ZERO)).id();
    let handle = world.resource_mut::<DeferredEffects>().schedule(
        gone,
        Duration::from_millis(10),
        TimedEffect::Wander,
    );
    world.entity_mut(gone).insert(Wander { handle });
    world.despawn(gone);

    elapse(&mut world, Duration::from_millis(10));

    // No halt was scheduled for an entity that no longer exists.
    assert!(world.resource::<DeferredEffects>().is_empty());
}

#[test]
fn stray_wander_timer_is_ignored() {
    let mut world = world_with_resources();
    let e = world.spawn((Enemy, LinearVelocity::ZERO)).id();
    let armed = world.resource_mut::<DeferredEffects>().schedule_repeating(
        e,
        Duration::from_millis(1000),
        TimedEffect::Wander,
    );
    world.entity_mut(e).insert(Wander { handle: armed });
    // A second retrigger bound to the same enemy but not the one it armed.
    world
        .resource_mut::<DeferredEffects>()
        .schedule(e, Duration::from_millis(100), TimedEffect::Wander);

    elapse(&mut world, Duration::from_millis(100));

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
    // No halt was queued: only the armed repeating timer remains.
    assert_eq!(world.resource::<DeferredEffects>().len(), 1);
}

#[test]
fn player_overlaps_enemies_through_a_sensor_only() {
    let mut world = world_with_resources();
    let e = spawn_via_commands(&mut world, Vec2::ZERO);

    let body = world.get::<CollisionLayers>(e).unwrap();
    assert!(!body.filters.has_all(Layer::Player));
    assert!(body.filters.has_all(Layer::Projectile));

    let children = world.get::<Children>(e).expect("enemy has a hurtbox");
    let hurtbox = children[0];
    assert!(world.get::<EnemyHurtbox>(hurtbox).is_some());
    assert!(world.get::<Sensor>(hurtbox).is_some());
    let layers = world.get::<CollisionLayers>(hurtbox).unwrap();
    assert!(layers.filters.has_all(Layer::Player));
}
