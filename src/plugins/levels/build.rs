//! Level construction.
//!
//! Validation happens before anything is spawned, so a broken map aborts with nothing
//! half-built in the world.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::deferred::DeferredEffects;
use crate::plugins::enemies::spawn_enemy;
use crate::plugins::player::spawn_player;
use crate::plugins::session::SessionState;

use super::map::{LevelMap, LevelRegistry};
use super::transition::{FollowTarget, LevelProgress, ScreenFade};
use super::{Coin, Portal};

/// What `construct_level` spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltLevel {
    pub player: Entity,
    pub portal: Option<Entity>,
    pub coins: usize,
    pub enemies: usize,
    pub blocked_tiles: usize,
}

/// Spawn every level-scoped entity of `map`.
///
/// Everything spawned here is despawned when the level is left (`DespawnOnExit`).
pub fn construct_level(
    commands: &mut Commands,
    deferred: &mut DeferredEffects,
    map: &LevelMap,
    tunables: &Tunables,
) -> Result<BuiltLevel, super::LevelError> {
    let blocked = map.blocked_layer()?;
    let player_spawn = map.player_spawn()?;

    let wall_layers = CollisionLayers::new(Layer::Blocked, [Layer::Player, Layer::Enemy]);
    let size = blocked.tile_size;
    for tile in &blocked.tiles {
        commands.spawn((
            Name::new("Blocked"),
            Sprite::from_color(Color::srgb(0.25, 0.27, 0.33), Vec2::splat(size)),
            Transform::from_translation(blocked.tile_center(*tile).extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size, size),
            wall_layers,
            DespawnOnExit(GameState::Transitioning),
        ));
    }

    let pickup_layers = CollisionLayers::new(Layer::Pickup, [Layer::Player]);

    let portal = map.portal.as_ref().map(|p| {
        commands
            .spawn((
                Name::new(format!("Portal->{}", p.destination)),
                Portal {
                    destination: p.destination,
                    offset_y: p.offset_y,
                },
                Sprite::from_color(Color::srgb(0.55, 0.35, 0.2), Vec2::new(48.0, 32.0)),
                Transform::from_translation((p.position + Vec2::Y * p.offset_y).extend(0.5)),
                RigidBody::Static,
                Collider::rectangle(48.0, 32.0),
                Sensor,
                pickup_layers,
                DespawnOnExit(GameState::Transitioning),
            ))
            .id()
    });
    if portal.is_none() {
        debug!("map '{}' has no portal", map.key);
    }

    for pos in &map.coins {
        commands.spawn((
            Name::new("Coin"),
            Coin::default(),
            Sprite::from_color(Color::srgb(0.95, 0.3, 0.45), Vec2::splat(20.0)),
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::circle(10.0),
            Sensor,
            pickup_layers,
            DespawnOnExit(GameState::Transitioning),
        ));
    }

    for pos in &map.enemies {
        spawn_enemy(commands, deferred, *pos, tunables);
    }

    let player = spawn_player(commands, player_spawn);

    Ok(BuiltLevel {
        player,
        portal,
        coins: map.coins.len(),
        enemies: map.enemies.len(),
        blocked_tiles: blocked.tiles.len(),
    })
}

/// `OnEnter(Loading)`: build the current level, then start playing it.
///
/// A missing level or a map without its `Blocked` layer is fatal: the error is logged and
/// handed to Bevy's error handler.
pub(super) fn build_level(
    mut commands: Commands,
    registry: Res<LevelRegistry>,
    progress: Res<LevelProgress>,
    tunables: Res<Tunables>,
    mut deferred: ResMut<DeferredEffects>,
    mut session: ResMut<SessionState>,
    mut follow: ResMut<FollowTarget>,
    mut fade: ResMut<ScreenFade>,
    mut next: ResMut<NextState<GameState>>,
) -> Result {
    let id = progress.current();
    let built = registry
        .get(id)
        .and_then(|map| construct_level(&mut commands, &mut deferred, map, &tunables))
        .inspect_err(|e| {
            let known: Vec<String> = registry.ids().map(|l| l.to_string()).collect();
            error!("cannot construct level {id}: {e} (registered levels: {})", known.join(", "));
        })?;

    if progress.is_new_game() {
        session.on_new_game();
    }
    follow.reset(built.player);
    fade.begin_in(tunables.fade_in);
    next.set(GameState::Playing);

    info!(
        "level {id} loaded: {} enemies, {} coins, {} blocked tiles",
        built.enemies, built.coins, built.blocked_tiles
    );
    Ok(())
}
