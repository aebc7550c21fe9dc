//! Level progression: transition requests, the double-transition guard, and the fade barrier.
//!
//! ```text
//! Playing        TransitionRequest / HealthDepleted -> LevelProgress::request
//!                accepted: fade-out begins, state -> Transitioning
//! Transitioning  fade-out completes -> LevelProgress::commit, state -> Loading
//! OnExit         pending timed effects revoked, level entities despawned (DespawnOnExit)
//! Loading        build (see `build`) -> state -> Playing, fade-in begins
//! OnEnter        Playing: guard released
//! ```
//!
//! Fade-out must finish before the next level is constructed: reconstruction happens in
//! `OnEnter(Loading)`, which is only reached from `commit_when_faded`.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::deferred::DeferredEffects;
use crate::plugins::health::HealthDepleted;

use super::map::LevelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    pub target: LevelId,
    pub new_game: bool,
}

impl LevelTransition {
    pub fn to(target: LevelId) -> Self {
        Self { target, new_game: false }
    }

    pub fn new_game() -> Self {
        Self { target: LevelId::FIRST, new_game: true }
    }
}

/// Ask for a level change, e.g. from a portal.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest(pub LevelTransition);

/// Which level is (or is about to be) loaded, and the transition guard.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    current: LevelId,
    new_game: bool,
    pending: Option<LevelTransition>,
    /// The pending transition already became `current`; it can no longer change.
    committed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Started a new transition.
    Accepted,
    /// A game over took over a pending portal transition.
    Upgraded,
    Ignored,
}

impl Default for LevelProgress {
    /// A fresh boot loads level 1 as a new game.
    fn default() -> Self {
        Self {
            current: LevelId::FIRST,
            new_game: true,
            pending: None,
            committed: false,
        }
    }
}

impl LevelProgress {
    #[inline]
    pub fn current(&self) -> LevelId {
        self.current
    }

    #[inline]
    pub fn is_new_game(&self) -> bool {
        self.new_game
    }

    #[inline]
    pub fn pending(&self) -> Option<LevelTransition> {
        self.pending
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Fold a transition into the guard.
    ///
    /// While a transition is in flight further requests are ignored, except that a game over
    /// replaces a pending portal transition that has not been committed yet.
    pub fn request(&mut self, transition: LevelTransition) -> RequestOutcome {
        match self.pending {
            None => {
                self.pending = Some(transition);
                RequestOutcome::Accepted
            }
            Some(p) if transition.new_game && !p.new_game && !self.committed => {
                self.pending = Some(transition);
                RequestOutcome::Upgraded
            }
            Some(_) => RequestOutcome::Ignored,
        }
    }

    /// Make the pending transition the level to load. The guard stays up until
    /// [`LevelProgress::level_ready`].
    pub fn commit(&mut self) -> Option<LevelTransition> {
        let t = self.pending?;
        self.current = t.target;
        self.new_game = t.new_game;
        self.committed = true;
        Some(t)
    }

    /// The new level finished loading: accept transitions again.
    pub fn level_ready(&mut self) {
        self.pending = None;
        self.committed = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FadePhase {
    #[default]
    Clear,
    Out(Timer),
    Black,
    In(Timer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEvent {
    OutComplete,
    InComplete,
}

/// Full-screen fade. Gameplay only cares about the fade-out completing; the render side
/// draws `alpha()`.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenFade {
    phase: FadePhase,
}

impl ScreenFade {
    pub fn begin_out(&mut self, duration: Duration) {
        self.phase = FadePhase::Out(Timer::new(duration, TimerMode::Once));
    }

    pub fn begin_in(&mut self, duration: Duration) {
        self.phase = FadePhase::In(Timer::new(duration, TimerMode::Once));
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.phase, FadePhase::Out(_))
    }

    /// Overlay opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        match &self.phase {
            FadePhase::Clear => 0.0,
            FadePhase::Out(t) => t.fraction(),
            FadePhase::Black => 1.0,
            FadePhase::In(t) => 1.0 - t.fraction(),
        }
    }

    pub fn tick(&mut self, dt: Duration) -> Option<FadeEvent> {
        let finished = match &mut self.phase {
            FadePhase::Out(t) | FadePhase::In(t) => {
                t.tick(dt);
                t.is_finished()
            }
            FadePhase::Clear | FadePhase::Black => return None,
        };
        if !finished {
            return None;
        }

        let (settled, event) = if self.is_fading_out() {
            (FadePhase::Black, FadeEvent::OutComplete)
        } else {
            (FadePhase::Clear, FadeEvent::InComplete)
        };
        self.phase = settled;
        Some(event)
    }
}

/// Entity the camera should follow. `snap` asks the camera to jump instead of easing.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FollowTarget {
    pub entity: Option<Entity>,
    pub snap: bool,
}

impl FollowTarget {
    pub fn reset(&mut self, entity: Entity) {
        self.entity = Some(entity);
        self.snap = true;
    }
}

/// Fold this tick's requests into `LevelProgress`. Health depletion wins over a portal,
/// in the same tick or while the portal's fade-out is still running.
pub(super) fn accept_transition_requests(
    mut depleted: MessageReader<HealthDepleted>,
    mut requests: MessageReader<TransitionRequest>,
    mut progress: ResMut<LevelProgress>,
    mut fade: ResMut<ScreenFade>,
    mut next: ResMut<NextState<GameState>>,
    tunables: Res<Tunables>,
) {
    let game_over = depleted.read().last().map(|_| LevelTransition::new_game());
    let candidates = game_over
        .into_iter()
        .chain(requests.read().map(|TransitionRequest(t)| *t));

    for t in candidates {
        match progress.request(t) {
            RequestOutcome::Accepted => {
                info!(
                    "transition to level {} accepted (new game: {})",
                    t.target, t.new_game
                );
                fade.begin_out(tunables.fade_out);
                next.set(GameState::Transitioning);
            }
            // Already fading out; only the destination changes.
            RequestOutcome::Upgraded => {
                info!("health depleted during transition, restarting at level {}", t.target);
            }
            RequestOutcome::Ignored => {
                debug!("transition to level {} ignored: already transitioning", t.target);
            }
        }
    }
}

pub(super) fn commit_when_faded(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    mut progress: ResMut<LevelProgress>,
    mut next: ResMut<NextState<GameState>>,
) {
    if fade.tick(time.delta()) != Some(FadeEvent::OutComplete) {
        return;
    }
    if let Some(t) = progress.commit() {
        debug!("fade-out complete, loading level {}", t.target);
        next.set(GameState::Loading);
    }
}

pub(super) fn advance_fade_in(time: Res<Time>, mut fade: ResMut<ScreenFade>) {
    fade.tick(time.delta());
}

pub(super) fn release_guard(mut progress: ResMut<LevelProgress>) {
    progress.level_ready();
}

/// Nothing scheduled against the outgoing level may fire after its entities are gone.
pub(super) fn revoke_level_effects(mut deferred: ResMut<DeferredEffects>) {
    let revoked = deferred.len();
    deferred.cancel_all();
    if revoked > 0 {
        debug!("revoked {revoked} pending timed effects on level teardown");
    }
}
