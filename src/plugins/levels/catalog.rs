//! Built-in levels.

use bevy::prelude::*;

use super::map::{BlockedLayer, LevelId, LevelMap, LevelRegistry, PortalObject};

const TILE: f32 = 64.0;

impl LevelRegistry {
    /// Levels shipped with the game: 1 leads to 2, 2 leads back to 1.
    pub fn builtin() -> Self {
        Self::empty()
            .with_level(LevelId(1), level_one())
            .with_level(LevelId(2), level_two())
    }
}

/// Center of tile `(x, y)` in world pixels.
#[inline]
fn at(x: i32, y: i32) -> Vec2 {
    (Vec2::new(x as f32, y as f32) + Vec2::splat(0.5)) * TILE
}

/// Border of a `width` x `height` room.
fn walls(width: i32, height: i32) -> Vec<IVec2> {
    let horizontal = (0..width).flat_map(|x| [IVec2::new(x, 0), IVec2::new(x, height - 1)]);
    let vertical = (1..height - 1).flat_map(|y| [IVec2::new(0, y), IVec2::new(width - 1, y)]);
    horizontal.chain(vertical).collect()
}

fn level_one() -> LevelMap {
    let mut tiles = walls(14, 11);
    // A pillar block and a short wall splitting the room.
    tiles.extend([IVec2::new(5, 4), IVec2::new(6, 4), IVec2::new(5, 5), IVec2::new(6, 5)]);
    tiles.extend((6..10).map(|y| IVec2::new(9, y)));

    LevelMap {
        key: "level1".into(),
        player: Some(at(2, 2)),
        portal: Some(PortalObject {
            position: at(11, 8),
            offset_y: -TILE / 4.0,
            destination: LevelId(2),
        }),
        coins: vec![at(3, 7), at(8, 2), at(11, 3), at(7, 8)],
        enemies: vec![at(4, 8), at(10, 4)],
        blocked: Some(BlockedLayer { tile_size: TILE, tiles }),
    }
}

fn level_two() -> LevelMap {
    let mut tiles = walls(16, 12);
    tiles.extend((2..7).map(|x| IVec2::new(x, 6)));
    tiles.extend((9..14).map(|x| IVec2::new(x, 4)));

    LevelMap {
        key: "level2".into(),
        player: Some(at(2, 9)),
        portal: Some(PortalObject {
            position: at(13, 2),
            offset_y: -TILE / 4.0,
            destination: LevelId(1),
        }),
        coins: vec![at(4, 3), at(7, 9), at(12, 8), at(13, 6), at(5, 8)],
        enemies: vec![at(6, 3), at(11, 9), at(12, 2)],
        blocked: Some(BlockedLayer { tile_size: TILE, tiles }),
    }
}
