use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn labels_read_the_session_counters() {
    let session = SessionState { coins_collected: 7, health: 2 };
    assert_eq!(HudField::Score.label(&session), "Score: 7");
    assert_eq!(HudField::Health.label(&session), "Health: 2");
}

#[test]
fn refresh_rewrites_every_field() {
    let mut world = World::new();
    world.init_resource::<SessionState>();
    let score = world.spawn((HudField::Score, Text::new("Score: 0"))).id();
    let health = world.spawn((HudField::Health, Text::new("Health: 3"))).id();

    {
        let mut session = world.resource_mut::<SessionState>();
        session.on_coin_collected();
        session.on_coin_collected();
        session.on_health_lost();
    }
    run_system_once(&mut world, refresh_hud);

    assert_eq!(world.get::<Text>(score).unwrap().0, "Score: 2");
    assert_eq!(world.get::<Text>(health).unwrap().0, "Health: 2");
}

#[test]
fn refresh_only_runs_when_session_changes() {
    let mut app = App::new();
    app.init_resource::<SessionState>()
        .add_systems(Update, refresh_hud.run_if(resource_changed::<SessionState>));
    let score = app.world_mut().spawn((HudField::Score, Text::new("stale"))).id();

    // First update: the resource was just added, so it counts as changed.
    app.update();
    assert_eq!(app.world().get::<Text>(score).unwrap().0, "Score: 0");

    app.world_mut().get_mut::<Text>(score).unwrap().0 = "stale".into();
    app.update();
    assert_eq!(app.world().get::<Text>(score).unwrap().0, "stale");

    app.world_mut().resource_mut::<SessionState>().on_coin_collected();
    app.update();
    assert_eq!(app.world().get::<Text>(score).unwrap().0, "Score: 1");
}
