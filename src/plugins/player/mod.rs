//! Player plugin.
//!
//! Pipeline:
//! - Update: sample arrow keys into `PlayerInput`
//! - FixedUpdate: resolve input into velocity + facing (see `movement`)
//! - FixedPostUpdate: classify what the player is touching (enemy, portal, coin) into messages

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, state::level_active, tunables::Tunables};
use crate::plugins::enemies::Enemy;
use crate::plugins::health::{BaseTint, HealthSystems, HitCooldown, PlayerStruck};
use crate::plugins::levels::{Coin, LevelTransition, Portal, TransitionRequest};
use crate::plugins::movement::{DirectionKeys, Facing, resolve};
use crate::plugins::session::CoinCollected;

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Latest sampled direction keys.
///
/// Headless apps have no keyboard; tests write this resource directly.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub keys: DirectionKeys,
}

const PLAYER_COLOR: Color = Color::srgb(0.2, 0.75, 0.9);

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(Update, gather_input.run_if(level_active))
        .add_systems(FixedUpdate, apply_movement.run_if(level_active))
        .add_systems(
            FixedPostUpdate,
            detect_player_contacts
                .after(CollisionEventSystems)
                .before(HealthSystems)
                .run_if(level_active),
        );
}

/// Spawn the player for a freshly built level.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::Blocked, Layer::Enemy, Layer::Pickup],
    );

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Facing::default(),
            HitCooldown::default(),
            BaseTint(PLAYER_COLOR),
            Sprite {
                color: PLAYER_COLOR,
                custom_size: Some(Vec2::splat(40.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::circle(18.0),
            layers,
            LinearVelocity::ZERO,
            CollidingEntities::default(),
            DespawnOnExit(GameState::Transitioning),
        ))
        .id()
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    input.keys = DirectionKeys {
        up: keys.pressed(KeyCode::ArrowUp),
        down: keys.pressed(KeyCode::ArrowDown),
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
    };
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &mut Facing), With<Player>>,
) {
    let Ok((mut vel, mut facing)) = q_player.single_mut() else {
        return;
    };

    let resolved = resolve(input.keys, tunables.player_speed);
    vel.0 = resolved.velocity;
    if let Some(f) = resolved.facing {
        *facing = f;
    }
}

/// Turn this tick's player contacts into gameplay messages.
///
/// Contacts are polled every tick, so a portal or enemy that stays overlapped keeps
/// reporting; the consumers (transition guard, hit cooldown) decide what counts.
fn detect_player_contacts(
    q_player: Query<&CollidingEntities, With<Player>>,
    q_collider_of: Query<&ColliderOf>,
    q_enemies: Query<(), With<Enemy>>,
    q_portals: Query<&Portal>,
    q_coins: Query<(), With<Coin>>,
    mut struck: MessageWriter<PlayerStruck>,
    mut transitions: MessageWriter<TransitionRequest>,
    mut coins: MessageWriter<CoinCollected>,
) {
    let Ok(colliding) = q_player.single() else {
        return;
    };

    for &collider in colliding.iter() {
        // Enemies are touched through a child sensor; attribute it to the enemy body.
        let other = q_collider_of.get(collider).map_or(collider, |c| c.body);
        if q_enemies.contains(other) {
            struck.write(PlayerStruck { enemy: other });
        } else if let Ok(portal) = q_portals.get(other) {
            transitions.write(TransitionRequest(LevelTransition::to(portal.destination)));
        } else if q_coins.contains(other) {
            coins.write(CoinCollected { coin: other });
        }
    }
}
