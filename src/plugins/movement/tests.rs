use bevy::prelude::*;

use super::*;

fn keys(up: bool, down: bool, left: bool, right: bool) -> DirectionKeys {
    DirectionKeys { up, down, left, right }
}

#[test]
fn diagonal_speed_matches_known_values() {
    assert_eq!(diagonal_speed(150.0), 107.0);
    assert_eq!(diagonal_speed(300.0), 213.0);
    assert_eq!(diagonal_speed(0.0), 0.0);
}

#[test]
fn diagonal_speed_never_exceeds_straight_and_tracks_it() {
    for s in 1..=2000u32 {
        let s = s as f32;
        let d = diagonal_speed(s);
        assert!(d <= s, "diagonal {d} exceeds straight {s}");

        // Resultant magnitude within rounding of the straight speed.
        let magnitude = Vec2::splat(d).length();
        assert!(magnitude >= s - 1e-3, "{magnitude} < {s}");
        assert!(magnitude <= s + std::f32::consts::SQRT_2, "{magnitude} too far above {s}");
    }
}

#[test]
fn single_axis_uses_straight_speed() {
    let r = resolve(keys(true, false, false, false), 150.0);
    assert_eq!(r.velocity, Vec2::new(0.0, 150.0));
    assert_eq!(r.facing, Some(Facing::North));

    let r = resolve(keys(false, false, true, false), 150.0);
    assert_eq!(r.velocity, Vec2::new(-150.0, 0.0));
    assert_eq!(r.facing, Some(Facing::West));
}

#[test]
fn two_axes_use_diagonal_speed_on_both() {
    let r = resolve(keys(false, true, false, true), 150.0);
    assert_eq!(r.velocity, Vec2::new(107.0, -107.0));
    assert_eq!(r.facing, Some(Facing::SouthEast));

    let r = resolve(keys(true, false, true, false), 150.0);
    assert_eq!(r.velocity, Vec2::new(-107.0, 107.0));
    assert_eq!(r.facing, Some(Facing::NorthWest));
}

#[test]
fn no_keys_zeroes_velocity_and_leaves_facing_unchanged() {
    let r = resolve(DirectionKeys::default(), 150.0);
    assert_eq!(r.velocity, Vec2::ZERO);
    assert_eq!(r.facing, None);
}

#[test]
fn releasing_one_axis_keeps_the_other() {
    let both = resolve(keys(true, false, false, true), 150.0);
    assert_eq!(both.facing, Some(Facing::NorthEast));

    let horizontal_only = resolve(keys(false, false, false, true), 150.0);
    assert_eq!(horizontal_only.velocity, Vec2::new(150.0, 0.0));
    assert_eq!(horizontal_only.facing, Some(Facing::East));
}

#[test]
fn opposite_keys_resolve_by_precedence() {
    // up beats down, left beats right
    let r = resolve(keys(true, true, true, true), 150.0);
    assert_eq!(r.facing, Some(Facing::NorthWest));
}

#[test]
fn every_facing_has_a_matching_velocity_direction() {
    for f in Facing::ALL {
        let v = f.velocity(300.0);
        let expected = if f.is_diagonal() { 213.0 } else { 300.0 };
        assert_eq!(v.x.abs().max(v.y.abs()), expected, "{f}");
        assert_eq!(v.signum().as_ivec2() * f.signs().abs(), f.signs(), "{f}");
    }
}

#[test]
fn default_facing_is_east() {
    assert_eq!(Facing::default(), Facing::East);
    assert_eq!(Facing::default().velocity(300.0), Vec2::new(300.0, 0.0));
}
