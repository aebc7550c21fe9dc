//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod deferred;
pub mod enemies;
pub mod health;
pub mod levels;
pub mod movement;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;

// Render-only
pub mod camera;
pub mod hud;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    deferred::plugin(app);
    session::plugin(app);
    levels::plugin(app);
    player::plugin(app);
    health::plugin(app);
    enemies::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    hud::plugin(app);
}
