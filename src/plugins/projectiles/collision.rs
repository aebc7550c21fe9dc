use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::enemies::Enemy;
use crate::plugins::health::DamageEnemy;

use super::components::{PooledProjectile, SlotState};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

/// Projectile vs enemy: retire the projectile now and damage the enemy once.
pub fn process_projectile_hits(
    mut started: MessageReader<CollisionStart>,
    mut q_slots: Query<&mut SlotState, With<PooledProjectile>>,
    q_enemies: Query<(), With<Enemy>>,
    mut damage: MessageWriter<DamageEnemy>,
    // A projectile touching two enemies in the same tick only hits the first.
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_slots.contains(t1.collider);
        let p2 = q_slots.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (projectile, other) = if p1 { (t1, t2) } else { (t2, t1) };

        let enemy = other.gameplay_owner();
        if !q_enemies.contains(enemy) {
            continue;
        }
        if !seen.insert(projectile.collider) {
            continue;
        }

        let Ok(mut state) = q_slots.get_mut(projectile.collider) else {
            continue;
        };
        if *state != SlotState::Active {
            continue;
        }

        *state = SlotState::PendingReturn;
        damage.write(DamageEnemy { enemy });
    }
}
