//! Level session controller.
//!
//! Owns which level is loaded, builds it from its `LevelMap`, and sequences transitions
//! (portal or game over) through a fade-out barrier. See `transition` for the state flow.

pub mod build;
pub mod catalog;
pub mod map;
pub mod transition;

use bevy::prelude::*;

use crate::common::state::{GameState, level_active};

pub use map::{BlockedLayer, LevelError, LevelId, LevelMap, LevelRegistry, PortalObject};
pub use transition::{
    FadeEvent, FollowTarget, LevelProgress, LevelTransition, RequestOutcome, ScreenFade,
    TransitionRequest,
};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub destination: LevelId,
    pub offset_y: f32,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Coin {
    pub collected: bool,
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<LevelRegistry>() {
        app.insert_resource(LevelRegistry::builtin());
    }

    app.init_resource::<LevelProgress>()
        .init_resource::<ScreenFade>()
        .init_resource::<FollowTarget>()
        .add_message::<TransitionRequest>();

    app.add_systems(OnEnter(GameState::Loading), build::build_level)
        .add_systems(OnEnter(GameState::Playing), transition::release_guard)
        .add_systems(OnExit(GameState::Transitioning), transition::revoke_level_effects);

    app.add_systems(
        Update,
        (
            transition::accept_transition_requests.run_if(level_active),
            transition::commit_when_faded.run_if(in_state(GameState::Transitioning)),
            transition::advance_fade_in.run_if(in_state(GameState::Playing)),
        )
            .chain(),
    );
}
