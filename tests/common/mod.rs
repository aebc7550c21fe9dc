//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `quarantine::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed step per `app.update()`, so fixed-schedule systems run
//!   deterministically.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use quarantine::common::state::GameState;

pub const STEP: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    quarantine::game::configure_headless(&mut app);
    // `App::run` normally finalizes plugins; tests drive `update()` directly.
    app.finish();
    app.cleanup();
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Update until `done` holds, at most `max_updates` times. Returns whether it held.
pub fn run_until(app: &mut App, max_updates: usize, mut done: impl FnMut(&App) -> bool) -> bool {
    for _ in 0..max_updates {
        if done(app) {
            return true;
        }
        app.update();
    }
    done(app)
}

/// Update for (at least) `duration` of game time.
pub fn advance(app: &mut App, duration: Duration) {
    let steps = duration.as_millis().div_ceil(STEP.as_millis()) as usize;
    for _ in 0..steps {
        app.update();
    }
}

/// Boot a headless app and run it until the first level is playable.
pub fn booted() -> App {
    let mut app = app_headless();
    assert!(
        run_until(&mut app, 20, |app| state(app) == GameState::Playing),
        "first level never reached Playing"
    );
    app
}
