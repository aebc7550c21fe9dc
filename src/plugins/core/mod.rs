//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

/// Floor colour between wall tiles.
pub const BACKGROUND: Color = Color::srgb(0.12, 0.14, 0.11);

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.insert_resource(ClearColor(BACKGROUND));
}

#[cfg(test)]
mod tests;
