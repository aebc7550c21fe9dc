//! Level descriptors: what a loaded tilemap hands to the game.
//!
//! A `LevelMap` mirrors the object layers a tilemap editor exports (`Player`, `Portal`,
//! `Coins`, `Enemies`) plus the `Blocked` tile layer. Positions are world-space pixels.

use std::collections::BTreeMap;
use std::fmt;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(pub u32);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortalObject {
    pub position: Vec2,
    /// Vertical offset applied to `position` when the portal is placed.
    pub offset_y: f32,
    pub destination: LevelId,
}

/// Collision tiles, in tile coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedLayer {
    pub tile_size: f32,
    pub tiles: Vec<IVec2>,
}

impl BlockedLayer {
    /// Center of a tile in world space.
    #[inline]
    pub fn tile_center(&self, tile: IVec2) -> Vec2 {
        (tile.as_vec2() + Vec2::splat(0.5)) * self.tile_size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    /// Resource key, e.g. `"level1"`.
    pub key: String,
    pub player: Option<Vec2>,
    pub portal: Option<PortalObject>,
    pub coins: Vec<Vec2>,
    pub enemies: Vec<Vec2>,
    pub blocked: Option<BlockedLayer>,
}

impl LevelMap {
    pub fn blocked_layer(&self) -> Result<&BlockedLayer, LevelError> {
        self.blocked.as_ref().ok_or_else(|| LevelError::MissingBlockedLayer {
            key: self.key.clone(),
        })
    }

    pub fn player_spawn(&self) -> Result<Vec2, LevelError> {
        self.player.ok_or_else(|| LevelError::MissingObject {
            key: self.key.clone(),
            layer: "Player",
        })
    }
}

/// Every level the game knows about, by id.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelRegistry {
    levels: BTreeMap<LevelId, LevelMap>,
}

impl LevelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, id: LevelId, map: LevelMap) -> Self {
        self.register(id, map);
        self
    }

    /// Replaces any level already registered under `id`.
    pub fn register(&mut self, id: LevelId, map: LevelMap) {
        self.levels.insert(id, map);
    }

    pub fn get(&self, id: LevelId) -> Result<&LevelMap, LevelError> {
        self.levels.get(&id).ok_or(LevelError::UnknownLevel { id })
    }

    pub fn ids(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.levels.keys().copied()
    }
}

/// Fatal level configuration problems. Level construction aborts on any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    UnknownLevel { id: LevelId },
    MissingBlockedLayer { key: String },
    MissingObject { key: String, layer: &'static str },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel { id } => write!(f, "level {id} is not registered"),
            Self::MissingBlockedLayer { key } => {
                write!(f, "map '{key}' is missing or does not have a Blocked layer")
            }
            Self::MissingObject { key, layer } => {
                write!(f, "map '{key}' has no object in the {layer} layer")
            }
        }
    }
}

impl std::error::Error for LevelError {}
