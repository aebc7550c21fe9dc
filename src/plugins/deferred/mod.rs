//! Deferred, cancellable timed effects.
//!
//! Every timed effect that acts on an entity (invulnerability expiry, tint clear, enemy
//! wander start/stop) is scheduled here against a monotonic game clock and returns a
//! [`TimerHandle`]. Whoever destroys an entity revokes its handles, so a fired effect never
//! lands on freed state.
//!
//! ```text
//! FixedUpdate
//!   tick_deferred_effects: clock += dt, due effects -> TimerFired messages
//!   consumers (health, enemies) read TimerFired and filter by TimedEffect
//! ```

use std::time::Duration;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<DeferredEffects>()
        .add_message::<TimerFired>()
        .add_systems(FixedUpdate, tick_deferred_effects.in_set(DeferredSystems));
}

/// Consumers of [`TimerFired`] order themselves after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeferredSystems;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    /// The player's post-hit invulnerability window is over.
    EndInvulnerability,
    /// Remove the hit tint from an enemy.
    ClearTint,
    /// An enemy picks a new random velocity.
    Wander,
    /// An enemy stops after a wander burst.
    HaltWander,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub owner: Entity,
    pub effect: TimedEffect,
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    owner: Entity,
    due: Duration,
    period: Option<Duration>,
    effect: TimedEffect,
}

#[derive(Resource, Debug, Default)]
pub struct DeferredEffects {
    now: Duration,
    next_handle: u64,
    pending: Vec<Pending>,
}

impl DeferredEffects {
    /// Current game clock.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, owner: Entity, delay: Duration, effect: TimedEffect) -> TimerHandle {
        self.push(owner, delay, None, effect)
    }

    /// Fires every `period` until cancelled.
    pub fn schedule_repeating(
        &mut self,
        owner: Entity,
        period: Duration,
        effect: TimedEffect,
    ) -> TimerHandle {
        // A zero period would fire on every advance forever.
        let period = period.max(Duration::from_millis(1));
        self.push(owner, period, Some(period), effect)
    }

    fn push(
        &mut self,
        owner: Entity,
        delay: Duration,
        period: Option<Duration>,
        effect: TimedEffect,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            owner,
            due: self.now + delay,
            period,
            effect,
        });
        handle
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Returns `false` if the handle already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Revoke every effect bound to `owner`. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.owner != owner);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Advance the clock and collect the effects that came due, earliest first.
    ///
    /// A repeating effect fires at most once per call and is re-armed one period later.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerFired> {
        self.now += dt;
        let now = self.now;

        let mut due: Vec<(Duration, TimerFired)> = Vec::new();
        self.pending.retain_mut(|p| {
            if p.due > now {
                return true;
            }
            due.push((
                p.due,
                TimerFired {
                    handle: p.handle,
                    owner: p.owner,
                    effect: p.effect,
                },
            ));
            match p.period {
                Some(period) => {
                    p.due += period;
                    true
                }
                None => false,
            }
        });

        due.sort_by_key(|(at, fired)| (*at, fired.handle));
        due.into_iter().map(|(_, fired)| fired).collect()
    }
}

fn tick_deferred_effects(
    time: Res<Time>,
    mut effects: ResMut<DeferredEffects>,
    mut fired: MessageWriter<TimerFired>,
) {
    let due = effects.advance(time.delta());
    if !due.is_empty() {
        fired.write_batch(due);
    }
}
