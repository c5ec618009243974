//! Failure values surfaced by dungeon construction and graph mutation.

use thiserror::Error;

use crate::types::{Direction, Pos};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DungeonError {
    #[error("infeasible dungeon configuration: {0}")]
    InfeasibleConfiguration(InfeasibleReason),
    #[error("a room already exists at ({}, {})", .pos.x, .pos.y)]
    DuplicateNode { pos: Pos },
    #[error("rooms at ({}, {}) and ({}, {}) are not adjacent going {direction:?}", .from.x, .from.y, .to.x, .to.y)]
    NotAdjacent { from: Pos, to: Pos, direction: Direction },
    #[error("the room graph has no Home room")]
    MissingHome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfeasibleReason {
    #[error("branch count {count} is outside 1..=4")]
    BranchCount { count: usize },
    #[error("{requested} requested rooms do not fit a world holding {capacity}")]
    WorldTooSmall { requested: usize, capacity: usize },
    #[error("{requested} collectibles requested but only {available} normal rooms are available")]
    TooManyCollectibles { requested: usize, available: usize },
    #[error("a {width}x{height} world of room size {room_size} exceeds the coordinate range")]
    WorldTooLarge { width: u32, height: u32, room_size: u32 },
    #[error("{field} must be at least 1")]
    ZeroDimension { field: &'static str },
}

impl From<InfeasibleReason> for DungeonError {
    fn from(reason: InfeasibleReason) -> Self {
        DungeonError::InfeasibleConfiguration(reason)
    }
}
