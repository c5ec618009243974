//! Public results of a dungeon build.

use crate::graph::RoomGraph;
use crate::types::RoomId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchReport {
    pub requested: usize,
    /// Rooms actually placed; lower than `requested` when steps were abandoned.
    pub built: usize,
    pub exit: Option<RoomId>,
}

#[derive(Clone, Debug)]
pub struct GeneratedDungeon {
    pub graph: RoomGraph,
    pub branches: Vec<BranchReport>,
    pub collectibles: Vec<RoomId>,
}

impl GeneratedDungeon {
    pub fn exits(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.branches.iter().filter_map(|branch| branch.exit)
    }
}
