use crate::graph::RoomGraph;
use crate::types::{Direction, RoomId};

/// Moves through whichever door the host asks for, if the current room has it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    pub fn choose_next_room(
        &self,
        graph: &RoomGraph,
        current: RoomId,
        direction: Option<Direction>,
    ) -> Option<RoomId> {
        graph.neighbor(current, direction?)
    }
}
