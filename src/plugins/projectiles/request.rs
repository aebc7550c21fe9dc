use bevy::prelude::*;

use crate::plugins::movement::Facing;
use crate::plugins::player::Player;

use super::messages::FireRequest;

/// Producer: Space (just pressed) fires along the player's last facing.
///
/// This system does not touch the pool.
pub fn request_player_fire(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    q_player: Query<(&Transform, &Facing), With<Player>>,
    mut writer: MessageWriter<FireRequest>,
) {
    let Some(keys) = keys else { return; };
    if !keys.just_pressed(KeyCode::Space) { return; }

    let (tf, facing) = match q_player.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single Player to fire from: {e:?}"); return; }
    };

    writer.write(FireRequest {
        origin: tf.translation.truncate(),
        facing: *facing,
    });
}
