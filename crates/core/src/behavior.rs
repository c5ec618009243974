//! Decision strategies that pick the next room for an agent.
//! This module exists so player input and autonomous patrol/chase share one decision entry point.
//! It does not move agents, time their movement, or apply room transitions.

mod patrol_chase;
mod perception;
mod player;

pub use patrol_chase::{ChaseConfig, PatrolChase};
pub use perception::{detection_distance, detects};
pub use player::PlayerControl;

use crate::graph::RoomGraph;
use crate::types::{BehaviorState, Direction, RoomId};

/// What an agent can observe this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stimulus {
    /// Room of the target being hunted; `None` when the target is out of play.
    pub target_room: Option<RoomId>,
    /// Direction requested by the host for player-controlled agents.
    pub direction: Option<Direction>,
}

#[derive(Clone, Debug)]
pub enum Behavior {
    PlayerControlled(PlayerControl),
    PatrolChase(PatrolChase),
}

impl Behavior {
    pub fn choose_next_room(
        &mut self,
        graph: &RoomGraph,
        current: RoomId,
        stimulus: Stimulus,
    ) -> Option<RoomId> {
        match self {
            Behavior::PlayerControlled(control) => {
                control.choose_next_room(graph, current, stimulus.direction)
            }
            Behavior::PatrolChase(machine) => {
                machine.choose_next_room(graph, current, stimulus.target_room)
            }
        }
    }

    pub fn state(&self) -> Option<BehaviorState> {
        match self {
            Behavior::PlayerControlled(_) => None,
            Behavior::PatrolChase(machine) => Some(machine.state()),
        }
    }
}
