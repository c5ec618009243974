//! Agents placed in the room graph: where they stand, where they are heading, and how they decide.

use rand_chacha::ChaCha8Rng;

use crate::behavior::{Behavior, ChaseConfig, PatrolChase, PlayerControl, Stimulus};
use crate::graph::RoomGraph;
use crate::types::{AgentRole, BehaviorState, RoomId};

/// In-flight move toward a neighboring room. `progress` runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub target: RoomId,
    pub progress: f32,
}

#[derive(Clone, Debug)]
pub struct Agent {
    role: AgentRole,
    room: RoomId,
    behavior: Behavior,
    /// Rooms crossed per second of simulated time.
    speed: f32,
    motion: Option<Motion>,
}

impl Agent {
    pub fn player(room: RoomId, speed: f32) -> Self {
        Self::new(AgentRole::Player, room, Behavior::PlayerControlled(PlayerControl), speed)
    }

    pub fn monster(room: RoomId, speed: f32, config: ChaseConfig, rng: ChaCha8Rng) -> Self {
        let behavior = Behavior::PatrolChase(PatrolChase::new(config, rng));
        Self::new(AgentRole::Monster, room, behavior, speed)
    }

    pub fn new(role: AgentRole, room: RoomId, behavior: Behavior, speed: f32) -> Self {
        Self { role, room, behavior, speed, motion: None }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn state(&self) -> Option<BehaviorState> {
        self.behavior.state()
    }

    pub fn motion(&self) -> Option<Motion> {
        self.motion
    }

    pub fn choose_next_room(&mut self, graph: &RoomGraph, stimulus: Stimulus) -> Option<RoomId> {
        self.behavior.choose_next_room(graph, self.room, stimulus)
    }

    pub(crate) fn start_move(&mut self, target: RoomId) {
        self.motion = Some(Motion { target, progress: 0.0 });
    }

    /// Advances the in-flight move; returns the room reached when it completes.
    pub(crate) fn advance(&mut self, dt: f32) -> Option<RoomId> {
        let motion = self.motion.as_mut()?;
        motion.progress += dt.max(0.0) * self.speed;
        if motion.progress < 1.0 {
            return None;
        }
        let target = motion.target;
        self.motion = None;
        Some(target)
    }

    pub(crate) fn place(&mut self, room: RoomId) {
        self.room = room;
        self.motion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Pos, RoomTag};

    #[test]
    fn move_completes_after_enough_elapsed_time() {
        let mut graph = RoomGraph::new(1);
        let a = graph.add(Pos::new(0, 0), RoomTag::Home).expect("free");
        let b = graph.add(Pos::new(1, 0), RoomTag::Normal).expect("free");
        graph.connect(a, b, Direction::Right).expect("adjacent");

        let mut player = Agent::player(a, 4.0);
        let stimulus = Stimulus { target_room: None, direction: Some(Direction::Right) };
        let next = player.choose_next_room(&graph, stimulus).expect("door to the right");
        player.start_move(next);

        assert_eq!(player.advance(0.1), None);
        assert_eq!(player.advance(0.1), None);
        assert_eq!(player.advance(0.1), Some(b));
        assert_eq!(player.motion(), None);
        assert_eq!(player.room(), a, "arrival is committed by the caller");
    }

    #[test]
    fn idle_agent_does_not_advance() {
        let mut graph = RoomGraph::new(1);
        let a = graph.add(Pos::new(0, 0), RoomTag::Home).expect("free");
        let mut player = Agent::player(a, 1.0);
        assert_eq!(player.advance(10.0), None);
        assert_eq!(player.state(), None);
    }
}
