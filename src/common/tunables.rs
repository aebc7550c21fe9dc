//! Tunable gameplay constants.

use std::ops::RangeInclusive;
use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub projectile_speed: f32,
    pub projectile_pool_size: usize,
    pub projectile_lifetime: Duration,
    pub invulnerability: Duration,
    pub enemy_flash: Duration,
    pub enemy_health: i32,
    pub fade_out: Duration,
    pub fade_in: Duration,
    /// Period of an enemy's repeating wander timer, in milliseconds. Drawn once per enemy.
    pub wander_period_ms: RangeInclusive<u64>,
    pub wander_burst: Duration,
    /// Per-axis wander speed magnitude.
    pub wander_speed: RangeInclusive<f32>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 64.0,
            player_speed: 150.0,
            projectile_speed: 300.0,
            projectile_pool_size: 5,
            projectile_lifetime: Duration::from_millis(1500),
            invulnerability: Duration::from_millis(1200),
            enemy_flash: Duration::from_millis(200),
            enemy_health: 3,
            fade_out: Duration::from_millis(100),
            fade_in: Duration::from_millis(500),
            wander_period_ms: 1000..=5000,
            wander_burst: Duration::from_millis(500),
            wander_speed: 50.0..=100.0,
        }
    }
}
