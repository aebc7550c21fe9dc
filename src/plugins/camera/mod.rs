//! Camera plugin: one persistent camera, eased follow, and the fade overlay.
//!
//! The camera and the overlay outlive level transitions. Each freshly built level resets
//! `FollowTarget` with `snap` set, so the first frame of a level jumps straight to the
//! new player instead of sliding across the map.
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` unless Bevy can
//! prove they are disjoint; the `Without<MainCamera>` filter is that proof.
//!
//! ```text
//! Startup:    spawn MainCamera + FadeOverlay
//! Update:     draw_fade mirrors ScreenFade::alpha onto the overlay
//! PostUpdate: follow_target eases (or snaps) toward FollowTarget
//! ```

use bevy::prelude::*;

use crate::plugins::levels::{FollowTarget, ScreenFade};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

/// Full-screen black node whose alpha follows the screen fade.
#[derive(Component)]
pub struct FadeOverlay;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (spawn_camera, spawn_fade_overlay))
        .add_systems(Update, draw_fade)
        .add_systems(
            PostUpdate,
            follow_target.before(TransformSystems::Propagate),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        Name::new("FadeOverlay"),
        FadeOverlay,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        GlobalZIndex(i32::MAX),
    ));
}

/// Frame-rate independent exponential ease.
#[inline]
fn ease_toward(from: Vec2, to: Vec2, responsiveness: f32, dt: f32) -> Vec2 {
    let alpha = 1.0 - (-responsiveness * dt).exp();
    from + (to - from) * alpha
}

fn follow_target(
    time: Res<Time>,
    mut follow: ResMut<FollowTarget>,
    q_target: Query<&Transform, Without<MainCamera>>,
    mut q_cam: Query<(&mut Transform, &MainCamera)>,
) {
    let Some(target) = follow.entity else { return; };
    // The target is gone while a level is being rebuilt.
    let Ok(tf_target) = q_target.get(target) else { return; };
    let Ok((mut tf_cam, cam)) = q_cam.single_mut() else { return; };

    let goal = tf_target.translation.truncate();
    let next = if follow.snap {
        follow.snap = false;
        goal
    } else {
        ease_toward(tf_cam.translation.truncate(), goal, cam.responsiveness, time.delta_secs())
    };

    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}

fn draw_fade(fade: Res<ScreenFade>, mut q: Query<&mut BackgroundColor, With<FadeOverlay>>) {
    if !fade.is_changed() {
        return;
    }
    for mut bg in &mut q {
        bg.0 = Color::BLACK.with_alpha(fade.alpha());
    }
}

#[cfg(test)]
mod tests;
