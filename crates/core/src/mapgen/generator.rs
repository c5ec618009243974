//! Dungeon build orchestration: validate, grow branches, close adjacent gaps, scatter collectibles.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{DungeonError, InfeasibleReason};
use crate::graph::RoomGraph;
use crate::types::{Direction, RoomId, RoomTag};

use super::collectibles::scatter_collectibles;
use super::config::DungeonConfig;
use super::growth::grow_branch;
use super::model::{BranchReport, GeneratedDungeon};
use super::seed::{GENERATION_STREAM, stream_rng};

pub struct MapGenerator {
    config: DungeonConfig,
    seed: u64,
}

impl MapGenerator {
    pub fn new(config: DungeonConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GeneratedDungeon, DungeonError> {
        self.config.validate()?;

        let mut rng = stream_rng(self.seed, GENERATION_STREAM);
        let mut graph = RoomGraph::new(self.config.room_size as i32);
        let home = graph.add(self.config.home_pos(), RoomTag::Home)?;

        let branches = self.grow_branches(&mut graph, &mut rng, home)?;
        connect_adjacent_rooms(&mut graph)?;

        let available = graph.count_tagged(RoomTag::Normal);
        if available < self.config.collectibles {
            return Err(InfeasibleReason::TooManyCollectibles {
                requested: self.config.collectibles,
                available,
            }
            .into());
        }
        let collectibles = scatter_collectibles(&mut graph, &mut rng, self.config.collectibles);

        debug!(
            seed = self.seed,
            rooms = graph.len(),
            requested = self.config.requested_rooms() + 1,
            exits = branches.iter().filter(|branch| branch.exit.is_some()).count(),
            "dungeon generated"
        );
        Ok(GeneratedDungeon { graph, branches, collectibles })
    }

    fn grow_branches(
        &self,
        graph: &mut RoomGraph,
        rng: &mut ChaCha8Rng,
        home: RoomId,
    ) -> Result<Vec<BranchReport>, DungeonError> {
        let mut reports = Vec::with_capacity(self.config.branch_lengths.len());
        for &requested in &self.config.branch_lengths {
            let built = grow_branch(graph, rng, &self.config, home, requested)?;
            reports.push(BranchReport { requested, built: built.len(), exit: built.last().copied() });
        }
        Ok(reports)
    }
}

/// Adds a door pair between every two adjacent rooms that lack one.
fn connect_adjacent_rooms(graph: &mut RoomGraph) -> Result<(), DungeonError> {
    for id in graph.room_ids() {
        for direction in Direction::ALL {
            let room = &graph[id];
            if room.has_door(direction) {
                continue;
            }
            if let Some(neighbor) = graph.id_at(graph.step(room.pos(), direction)) {
                graph.connect(id, neighbor, direction)?;
            }
        }
    }
    Ok(())
}
