//! Projectiles plugin: a fixed pool of slots behind a message-based fire pipeline.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌──────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: request_player_fire                                        │
//!│      - reads: Space (just pressed), player Transform + Facing             │
//!│      - writes: FireRequest                                                │
//!│                                                                           │
//!│  (B) Consumer: allocate_projectiles                                       │
//!│      - first Idle slot by pool index; none idle -> request dropped        │
//!│      - writes: SlotState::Active, Lifetime (reset), Transform, velocity,  │
//!│                Visibility, CollisionLayers                                │
//!└──────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate
//!┌──────────────────────────────────────────────────────────────────────────┐
//!│  (C) tick_lifetimes: expired Active -> PendingReturn                      │
//!└──────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//!┌──────────────────────────────────────────────────────────────────────────┐
//!│  (D) Avian emits CollisionStart                                           │
//!│  (E) process_projectile_hits: Active -> PendingReturn, DamageEnemy        │
//!│      (before HealthSystems, so the enemy takes the hit this tick)         │
//!│  (F) return_to_pool_commit: PendingReturn -> Idle                         │
//!└──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Slots are never spawned or despawned after startup. Leaving a level parks every slot.

pub mod components;
pub mod pool;
pub mod collision;
pub mod lifetime;

pub mod messages;
pub mod request;
pub mod allocator;
pub mod commit;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::{GameState, level_active};
use crate::plugins::health::HealthSystems;

pub use components::{Lifetime, PooledProjectile, SlotState};
pub use messages::FireRequest;
pub use pool::ProjectilePool;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        // Pool size comes from Tunables at startup.
        app.init_resource::<ProjectilePool>()
            .add_message::<FireRequest>()
            .add_systems(Startup, pool::init_projectile_pool);

        app.add_systems(
            Update,
            (
                request::request_player_fire,
                allocator::allocate_projectiles.after(request::request_player_fire),
            )
                .run_if(level_active),
        );

        app.add_systems(
            FixedUpdate,
            lifetime::tick_lifetimes.run_if(level_active),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_projectile_hits
                    .after(CollisionEventSystems)
                    .before(HealthSystems),
                commit::return_to_pool_commit.after(collision::process_projectile_hits),
            )
                .run_if(level_active),
        );

        app.add_systems(OnExit(GameState::Transitioning), commit::park_all_projectiles);
    }
}
