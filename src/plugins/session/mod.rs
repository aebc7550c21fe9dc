//! Session (score / health) counters.
//!
//! `SessionState` is the single owner of the playthrough counters. Gameplay mutates it
//! through its methods; the HUD re-reads it whenever Bevy reports the resource changed.
//! It survives level transitions and is only reset on a new game.

use bevy::prelude::*;

use crate::common::state::level_active;
use crate::plugins::levels::Coin;

pub const STARTING_COINS: u32 = 0;
pub const STARTING_HEALTH: u32 = 3;

pub fn plugin(app: &mut App) {
    app.init_resource::<SessionState>()
        .add_message::<CoinCollected>()
        .add_systems(FixedPostUpdate, collect_coins.run_if(level_active));
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub coins_collected: u32,
    pub health: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            coins_collected: STARTING_COINS,
            health: STARTING_HEALTH,
        }
    }
}

impl SessionState {
    pub fn on_coin_collected(&mut self) {
        self.coins_collected = self.coins_collected.saturating_add(1);
    }

    /// Returns the remaining health. Never goes below zero.
    pub fn on_health_lost(&mut self) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.health
    }

    pub fn on_new_game(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }
}

/// The player touched a coin.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinCollected {
    pub coin: Entity,
}

/// Remove collected coins and count them.
///
/// A coin touched twice before its despawn is applied only counts once.
fn collect_coins(
    mut commands: Commands,
    mut reader: MessageReader<CoinCollected>,
    mut session: ResMut<SessionState>,
    mut q_coins: Query<&mut Coin>,
) {
    for CoinCollected { coin } in reader.read() {
        let Ok(mut c) = q_coins.get_mut(*coin) else {
            continue;
        };
        if c.collected {
            continue;
        }
        c.collected = true;
        session.on_coin_collected();
        commands.entity(*coin).despawn();
    }
}
