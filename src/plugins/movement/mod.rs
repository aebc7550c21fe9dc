//! Directional movement resolver.
//!
//! Turns four held direction keys into a velocity and an 8-way facing. The two axes are
//! resolved independently, so releasing the vertical keys keeps any horizontal motion.
//! Velocity is set directly each tick: there is no acceleration curve.
//!
//! World space is y-up, so "north" is `+y`.

use std::fmt;

use bevy::prelude::*;

/// Per-axis speed when moving on two axes at once.
///
/// The straight speed projected onto 45 degrees, rounded up, so diagonal travel never
/// outruns straight travel by more than the rounding.
#[inline]
pub fn diagonal_speed(straight: f32) -> f32 {
    (straight * straight / 2.0).sqrt().ceil()
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    North,
    South,
    #[default]
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::North,
        Facing::South,
        Facing::East,
        Facing::West,
        Facing::NorthEast,
        Facing::NorthWest,
        Facing::SouthEast,
        Facing::SouthWest,
    ];

    /// Unit-free direction signs, `(x, y)` in `{-1, 0, 1}`.
    #[inline]
    pub fn signs(self) -> IVec2 {
        match self {
            Facing::North => IVec2::new(0, 1),
            Facing::South => IVec2::new(0, -1),
            Facing::East => IVec2::new(1, 0),
            Facing::West => IVec2::new(-1, 0),
            Facing::NorthEast => IVec2::new(1, 1),
            Facing::NorthWest => IVec2::new(-1, 1),
            Facing::SouthEast => IVec2::new(1, -1),
            Facing::SouthWest => IVec2::new(-1, -1),
        }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        let s = self.signs();
        s.x != 0 && s.y != 0
    }

    /// Velocity for travel along this facing: `straight` on a single axis,
    /// [`diagonal_speed`] on both axes for the diagonals.
    pub fn velocity(self, straight: f32) -> Vec2 {
        let speed = if self.is_diagonal() {
            diagonal_speed(straight)
        } else {
            straight
        };
        self.signs().as_vec2() * speed
    }

    fn from_signs(x: i32, y: i32) -> Option<Facing> {
        Some(match (x, y) {
            (0, 1) => Facing::North,
            (0, -1) => Facing::South,
            (1, 0) => Facing::East,
            (-1, 0) => Facing::West,
            (1, 1) => Facing::NorthEast,
            (-1, 1) => Facing::NorthWest,
            (1, -1) => Facing::SouthEast,
            (-1, -1) => Facing::SouthWest,
            _ => return None,
        })
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East => "east",
            Facing::West => "west",
            Facing::NorthEast => "north-east",
            Facing::NorthWest => "north-west",
            Facing::SouthEast => "south-east",
            Facing::SouthWest => "south-west",
        })
    }
}

/// Held state of the four direction keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Axis signs with precedence: up beats down, left beats right.
    #[inline]
    fn axis_signs(self) -> (i32, i32) {
        let y = if self.up {
            1
        } else if self.down {
            -1
        } else {
            0
        };
        let x = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub velocity: Vec2,
    /// `None` when no key is held: the caller keeps its previous facing.
    pub facing: Option<Facing>,
}

pub fn resolve(keys: DirectionKeys, straight: f32) -> Resolved {
    let (x, y) = keys.axis_signs();
    let facing = Facing::from_signs(x, y);
    let velocity = facing.map_or(Vec2::ZERO, |f| f.velocity(straight));
    Resolved { velocity, facing }
}

#[cfg(test)]
mod tests;
