//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    /// Tiles from a level's `Blocked` layer.
    Blocked,
    Player,
    Enemy,
    Projectile,
    /// Coins and portals: sensors that only the player touches.
    Pickup,
}
