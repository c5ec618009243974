pub mod agent;
pub mod behavior;
pub mod error;
pub mod graph;
pub mod mapgen;
pub mod pathfinding;
pub mod session;
pub mod types;

pub use agent::{Agent, Motion};
pub use behavior::{Behavior, ChaseConfig, PatrolChase, PlayerControl, Stimulus};
pub use error::{DungeonError, InfeasibleReason};
pub use graph::{Doors, Room, RoomGraph};
pub use mapgen::{BranchReport, DungeonConfig, GeneratedDungeon, MapGenerator, build_dungeon};
pub use pathfinding::{Path, find_path, reachable_rooms};
pub use session::{Decision, Session, SessionConfig, TickReport};
pub use types::*;
