//! Fire consumer: activate the first idle slot.
//!
//! Slots are scanned in pool index order, lowest first. With every slot in flight the
//! request is dropped; that is a capacity decision, not an error.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Lifetime, PooledProjectile, SlotState};
use super::messages::FireRequest;
use super::pool::{ProjectilePool, active_projectile_layers};

pub fn allocate_projectiles(
    pool: Res<ProjectilePool>,
    tunables: Res<Tunables>,
    mut reader: MessageReader<FireRequest>,
    mut q: Query<(
        &mut SlotState,
        &mut Lifetime,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
        &mut CollisionLayers,
    ), With<PooledProjectile>>,
) {
    for req in reader.read() {
        let idle = pool
            .slots
            .iter()
            .copied()
            .find(|&e| q.get(e).is_ok_and(|(state, ..)| *state == SlotState::Idle));
        let Some(e) = idle else {
            debug!("fire request dropped, all {} projectiles in flight", pool.capacity());
            continue;
        };
        let Ok((mut state, mut lifetime, mut tf, mut vel, mut vis, mut layers)) = q.get_mut(e) else {
            continue;
        };

        *state = SlotState::Active;
        lifetime.0 = Timer::new(tunables.projectile_lifetime, TimerMode::Once);
        tf.translation = req.origin.extend(2.0);
        vel.0 = req.facing.velocity(tunables.projectile_speed);
        *vis = Visibility::Visible;
        *layers = active_projectile_layers();
        debug!("projectile {e} fired {}", req.facing);
    }
}
