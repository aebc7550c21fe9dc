//! Buffered fire requests.
//!
//! Producers (input) only write intent; the allocator is the single writer of slot state.

use bevy::prelude::*;

use crate::plugins::movement::Facing;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FireRequest {
    pub origin: Vec2,
    pub facing: Facing,
}
