use bevy::prelude::*;

/// Marks one of the pre-spawned projectile slots. `index` is its position in the pool.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PooledProjectile {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Idle,
    Active,
    /// Retired this tick (lifetime ran out or it hit an enemy); the commit makes it idle.
    PendingReturn,
}

/// Remaining flight time. Reset on every fire.
#[derive(Component, Debug, Clone)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    pub fn new(duration: std::time::Duration) -> Self {
        Self(Timer::new(duration, TimerMode::Once))
    }
}
