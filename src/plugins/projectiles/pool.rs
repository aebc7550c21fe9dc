use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, tunables::Tunables};

use super::components::{Lifetime, PooledProjectile, SlotState};

/// The fixed set of projectile slots, in index order.
///
/// Slots are spawned once at startup and never destroyed; only their state cycles.
#[derive(Resource, Debug, Default)]
pub struct ProjectilePool {
    pub slots: Vec<Entity>,
}

impl ProjectilePool {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [Layer::Enemy])
}

/// Parked slots collide with nothing, so they never produce collision events.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [] as [Layer; 0])
}

/// Pre-spawn the pool (all idle).
pub fn init_projectile_pool(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pool: ResMut<ProjectilePool>,
) {
    pool.slots.clear();
    pool.slots.reserve(tunables.projectile_pool_size);

    for index in 0..tunables.projectile_pool_size {
        let e = commands
            .spawn((
                Name::new(format!("Projectile({index})")),
                PooledProjectile { index },
                SlotState::Idle,
                Lifetime::new(tunables.projectile_lifetime),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Kinematic,
                Collider::circle(4.0),
                Sensor,
                inactive_projectile_layers(),
                LinearVelocity(Vec2::ZERO),
                CollisionEventsEnabled,
            ))
            .id();

        pool.slots.push(e);
    }

    debug!("projectile pool ready with {} slots", pool.capacity());
}
