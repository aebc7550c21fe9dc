//! Enemies: wandering targets with a few hit points.
//!
//! Each enemy owns a repeating `Wander` effect with a period drawn once at spawn. When it
//! fires the enemy picks a random velocity; a one-shot `HaltWander` stops it again shortly
//! after. Both are bound to the enemy in `DeferredEffects`, so the health model revokes
//! them when the enemy dies.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;
use std::time::Duration;

use crate::common::{layers::Layer, state::GameState, state::level_active, tunables::Tunables};
use crate::plugins::deferred::{
    DeferredEffects, DeferredSystems, TimedEffect, TimerFired, TimerHandle,
};
use crate::plugins::health::{BaseTint, Health, HitFlash};

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Handle of the enemy's repeating movement retrigger.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wander {
    pub handle: TimerHandle,
}

/// Sensor child that reports player contact without pushing either body.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyHurtbox;

const ENEMY_COLOR: Color = Color::srgb(0.9, 0.25, 0.25);

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        wander.after(DeferredSystems).run_if(level_active),
    );
}

/// Spawn an enemy and arm its wander timer.
pub fn spawn_enemy(
    commands: &mut Commands,
    deferred: &mut DeferredEffects,
    position: Vec2,
    tunables: &Tunables,
) -> Entity {
    // The body is solid against walls and takes projectile hits. The player only overlaps
    // enemies, through the sensor hurtbox child.
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::Blocked, Layer::Projectile]);

    let e = commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            Health { hp: tunables.enemy_health },
            HitFlash::default(),
            BaseTint(ENEMY_COLOR),
            Sprite {
                color: ENEMY_COLOR,
                custom_size: Some(Vec2::splat(40.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::circle(18.0),
            layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::Transitioning),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("EnemyHurtbox"),
                EnemyHurtbox,
                Transform::default(),
                Collider::circle(18.0),
                Sensor,
                CollisionLayers::new(Layer::Enemy, [Layer::Player]),
            ));
        })
        .id();

    let period = wander_period(&mut rand::thread_rng(), tunables);
    let handle = deferred.schedule_repeating(e, period, TimedEffect::Wander);
    commands.entity(e).insert(Wander { handle });
    e
}

fn wander_period(rng: &mut impl Rng, tunables: &Tunables) -> Duration {
    Duration::from_millis(rng.gen_range(tunables.wander_period_ms.clone()))
}

/// Random per-axis velocity: magnitude in the tunable range, random sign.
pub fn wander_velocity(rng: &mut impl Rng, tunables: &Tunables) -> Vec2 {
    let mut axis = || {
        let speed = rng.gen_range(tunables.wander_speed.clone());
        if rng.gen_bool(0.5) { speed } else { -speed }
    };
    Vec2::new(axis(), axis())
}

fn wander(
    mut fired: MessageReader<TimerFired>,
    mut deferred: ResMut<DeferredEffects>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut LinearVelocity, &Wander), With<Enemy>>,
) {
    let mut rng = rand::thread_rng();

    for f in fired.read() {
        if !matches!(f.effect, TimedEffect::Wander | TimedEffect::HaltWander) {
            continue;
        }
        let Ok((mut vel, wander)) = q.get_mut(f.owner) else {
            continue;
        };

        if f.effect == TimedEffect::Wander {
            // Only the enemy's own armed retrigger starts a burst.
            if f.handle != wander.handle {
                continue;
            }
            vel.0 = wander_velocity(&mut rng, &tunables);
            deferred.schedule(f.owner, tunables.wander_burst, TimedEffect::HaltWander);
        } else {
            vel.0 = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests;
