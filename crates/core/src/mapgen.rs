//! Procedural dungeon generation split into coherent submodules.

pub mod config;
pub mod model;

mod collectibles;
mod generator;
mod growth;
pub(crate) mod seed;

pub use config::{DungeonConfig, MAX_BRANCHES};
pub use generator::MapGenerator;
pub use model::{BranchReport, GeneratedDungeon};

use crate::error::DungeonError;
use crate::graph::RoomGraph;

/// Builds the room graph for `config`; the same `(config, seed)` always yields the same graph.
pub fn build_dungeon(config: &DungeonConfig, seed: u64) -> Result<RoomGraph, DungeonError> {
    MapGenerator::new(config.clone(), seed).generate().map(|dungeon| dungeon.graph)
}
