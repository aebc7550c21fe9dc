//! HUD: score and health text in the top-left corner.
//!
//! Reads `SessionState` only when Bevy reports it changed.

use bevy::prelude::*;

use crate::plugins::session::SessionState;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Score,
    Health,
}

impl HudField {
    pub fn label(self, session: &SessionState) -> String {
        match self {
            HudField::Score => format!("Score: {}", session.coins_collected),
            HudField::Health => format!("Health: {}", session.health),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(Update, refresh_hud.run_if(resource_changed::<SessionState>));
}

fn spawn_hud(mut commands: Commands, session: Res<SessionState>) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            for field in [HudField::Score, HudField::Health] {
                parent.spawn((
                    field,
                    Text::new(field.label(&session)),
                    TextFont { font_size: 24.0, ..default() },
                    TextColor(Color::WHITE),
                ));
            }
        });
}

fn refresh_hud(session: Res<SessionState>, mut q: Query<(&HudField, &mut Text)>) {
    for (field, mut text) in &mut q {
        text.0 = field.label(&session);
    }
}

#[cfg(test)]
mod tests;
