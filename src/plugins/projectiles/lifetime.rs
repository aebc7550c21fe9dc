use bevy::prelude::*;

use super::components::{Lifetime, PooledProjectile, SlotState};

/// Count down active slots; an expired slot is retired whether or not it hit anything.
pub fn tick_lifetimes(
    time: Res<Time>,
    mut q: Query<(&mut SlotState, &mut Lifetime), With<PooledProjectile>>,
) {
    for (mut state, mut lifetime) in &mut q {
        if *state != SlotState::Active {
            continue;
        }
        if lifetime.0.tick(time.delta()).is_finished() {
            *state = SlotState::PendingReturn;
        }
    }
}
