//! Entity health model: damage, death, and hit feedback timing.
//!
//! Enemies carry their own `Health`. The player's health is the session counter
//! (`SessionState::health`), gated by a post-hit invulnerability window.
//!
//! ```text
//! DamageEnemy  -> Health::damage -> Depleted: revoke timers, despawn
//!                                -> Alive:    tint, ClearTint in 200ms (replaces any pending)
//! PlayerStruck -> window open?   -> ignored (the window is not refreshed)
//!              -> session health -1, tint, EndInvulnerability in 1200ms
//!              -> health 0: HealthDepleted
//! TimerFired(EndInvulnerability | ClearTint) -> restore base tint
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::level_active, tunables::Tunables};
use crate::plugins::deferred::{
    DeferredEffects, DeferredSystems, TimedEffect, TimerFired, TimerHandle,
};
use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;
use crate::plugins::session::SessionState;

/// Tint applied while hit feedback is showing.
pub const HIT_TINT: Color = Color::srgb(0.6, 0.6, 0.6);

pub fn plugin(app: &mut App) {
    app.add_message::<PlayerStruck>()
        .add_message::<DamageEnemy>()
        .add_message::<HealthDepleted>();

    app.add_systems(
        FixedUpdate,
        clear_hit_feedback
            .after(DeferredSystems)
            .run_if(level_active),
    );

    app.add_systems(
        FixedPostUpdate,
        (apply_player_strikes, apply_enemy_damage)
            .in_set(HealthSystems)
            .run_if(level_active),
    );
}

/// Damage resolution; producers (contacts, projectile hits) run before this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HealthSystems;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive { remaining: i32 },
    Depleted,
}

impl Health {
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    pub fn damage(&mut self) -> Vitality {
        self.hp -= 1;
        if self.is_depleted() {
            Vitality::Depleted
        } else {
            Vitality::Alive { remaining: self.hp }
        }
    }
}

/// Post-hit invulnerability window of the player.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitCooldown {
    handle: Option<TimerHandle>,
}

impl HitCooldown {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

/// Pending tint clear of an enemy.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitFlash {
    handle: Option<TimerHandle>,
}

/// Sprite color to restore when hit feedback ends.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseTint(pub Color);

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStruck {
    pub enemy: Entity,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEnemy {
    pub enemy: Entity,
}

/// The player's health reached zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthDepleted;

fn apply_player_strikes(
    mut reader: MessageReader<PlayerStruck>,
    mut depleted: MessageWriter<HealthDepleted>,
    mut session: ResMut<SessionState>,
    mut deferred: ResMut<DeferredEffects>,
    tunables: Res<Tunables>,
    mut q_player: Query<(Entity, &mut HitCooldown, Option<&mut Sprite>), With<Player>>,
) {
    for _ in reader.read() {
        let Ok((player, mut cooldown, sprite)) = q_player.single_mut() else {
            return;
        };
        // Already out of health: the restart is on its way.
        if cooldown.is_active() || session.is_depleted() {
            continue;
        }

        let remaining = session.on_health_lost();
        cooldown.handle = Some(deferred.schedule(
            player,
            tunables.invulnerability,
            TimedEffect::EndInvulnerability,
        ));
        if let Some(mut sprite) = sprite {
            sprite.color = HIT_TINT;
        }

        debug!("player hit, {remaining} health left");
        if remaining == 0 {
            depleted.write(HealthDepleted);
        }
    }
}

fn apply_enemy_damage(
    mut commands: Commands,
    mut reader: MessageReader<DamageEnemy>,
    mut deferred: ResMut<DeferredEffects>,
    tunables: Res<Tunables>,
    mut q_enemies: Query<
        (&mut Health, &mut HitFlash, &mut CollisionLayers, Option<&mut Sprite>),
        With<Enemy>,
    >,
) {
    for DamageEnemy { enemy } in reader.read() {
        let Ok((mut health, mut flash, mut layers, sprite)) = q_enemies.get_mut(*enemy) else {
            continue;
        };
        // Already dying this tick; the despawn is still queued.
        if health.is_depleted() {
            continue;
        }

        match health.damage() {
            Vitality::Depleted => {
                let revoked = deferred.cancel_owner(*enemy);
                *layers = CollisionLayers::new(Layer::Enemy, [] as [Layer; 0]);
                commands.entity(*enemy).despawn();
                debug!("enemy {enemy} destroyed, {revoked} timed effects revoked");
            }
            Vitality::Alive { .. } => {
                if let Some(previous) = flash.handle.take() {
                    deferred.cancel(previous);
                }
                flash.handle = Some(deferred.schedule(
                    *enemy,
                    tunables.enemy_flash,
                    TimedEffect::ClearTint,
                ));
                if let Some(mut sprite) = sprite {
                    sprite.color = HIT_TINT;
                }
            }
        }
    }
}

fn clear_hit_feedback(
    mut fired: MessageReader<TimerFired>,
    mut q: Query<(
        Option<&mut HitCooldown>,
        Option<&mut HitFlash>,
        Option<&BaseTint>,
        Option<&mut Sprite>,
    )>,
) {
    for f in fired.read() {
        if !matches!(f.effect, TimedEffect::EndInvulnerability | TimedEffect::ClearTint) {
            continue;
        }
        let Ok((cooldown, flash, base, sprite)) = q.get_mut(f.owner) else {
            continue;
        };

        match f.effect {
            TimedEffect::EndInvulnerability => {
                if let Some(mut c) = cooldown.filter(|c| c.handle == Some(f.handle)) {
                    c.handle = None;
                }
            }
            _ => {
                if let Some(mut fl) = flash.filter(|fl| fl.handle == Some(f.handle)) {
                    fl.handle = None;
                }
            }
        }

        if let (Some(BaseTint(color)), Some(mut sprite)) = (base, sprite) {
            sprite.color = *color;
        }
    }
}
