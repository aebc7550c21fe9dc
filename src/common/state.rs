//! Global state machine.
//!
//! ```text
//! Loading ──build ok──> Playing ──portal / health depleted──> Transitioning
//!    ^                                                             │
//!    └──────────────────────── fade-out complete ──────────────────┘
//! ```
//!
//! The target of a transition lives in `LevelProgress`, not in the state value.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Transitioning,
}

/// Run condition: a level is on screen and its world keeps simulating.
///
/// The world keeps running during the fade-out, so collisions can still fire while a
/// transition is pending; `LevelProgress` ignores those.
pub fn level_active(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|s| matches!(s.get(), GameState::Playing | GameState::Transitioning))
}
