use std::time::Duration;

use bevy::prelude::*;
use crate::plugins::core;
use crate::common::tunables::Tunables;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert_eq!(app.world().resource::<ClearColor>().0, core::BACKGROUND);
}

#[test]
fn keeps_tunables_supplied_by_the_host() {
    let mut app = App::new();
    app.insert_resource(Tunables {
        projectile_pool_size: 2,
        fade_out: Duration::from_millis(10),
        ..default()
    });
    core::plugin(&mut app);

    let tunables = app.world().resource::<Tunables>();
    assert_eq!(tunables.projectile_pool_size, 2);
    assert_eq!(tunables.fade_out, Duration::from_millis(10));
}

#[test]
fn default_tunables_match_the_game_constants() {
    let t = Tunables::default();
    assert_eq!(t.player_speed, 150.0);
    assert_eq!(t.projectile_speed, 300.0);
    assert_eq!(t.projectile_pool_size, 5);
    assert_eq!(t.projectile_lifetime, Duration::from_millis(1500));
    assert_eq!(t.invulnerability, Duration::from_millis(1200));
    assert_eq!(t.enemy_flash, Duration::from_millis(200));
    assert_eq!(t.enemy_health, 3);
}
