//! Return commit: the single place that writes the idle invariants.
//!
//! Idle slots are hidden, have zero velocity, and collide with nothing.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, SlotState};
use super::pool::inactive_projectile_layers;

pub fn return_to_pool_commit(
    mut q: Query<(
        &mut SlotState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledProjectile>>,
) {
    for (mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != SlotState::PendingReturn { continue; }
        park(&mut state, &mut vis, &mut vel, &mut layers);
    }
}

/// Level teardown: everything in flight goes back to idle.
pub fn park_all_projectiles(
    mut q: Query<(
        &mut SlotState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledProjectile>>,
) {
    for (mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state == SlotState::Idle { continue; }
        park(&mut state, &mut vis, &mut vel, &mut layers);
    }
}

#[inline]
fn park(
    state: &mut SlotState,
    vis: &mut Visibility,
    vel: &mut LinearVelocity,
    layers: &mut CollisionLayers,
) {
    *state = SlotState::Idle;
    *vis = Visibility::Hidden;
    vel.0 = Vec2::ZERO;
    *layers = inactive_projectile_layers();
}
