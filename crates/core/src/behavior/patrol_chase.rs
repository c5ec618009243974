//! Two-state patrol/chase machine for the monster.
//!
//! While patrolling the agent wanders through random doors. Seeing the target, or the
//! periodic scan coming due, switches it to chasing: an A* route to the target's room is
//! cached and followed one room per decision. The route is only rebuilt when the target
//! is seen in a different room; once it runs out the agent goes back to patrolling.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::RoomGraph;
use crate::mapgen::seed::random_index;
use crate::pathfinding::find_path;
use crate::types::{BehaviorState, Direction, RoomId};

use super::perception::detects;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Detection radius in room steps.
    pub detection_radius: u32,
    /// Non-detecting patrol decisions before a chase is forced; `None` disables scanning.
    pub scan_delay: Option<u32>,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self { detection_radius: 3, scan_delay: Some(12) }
    }
}

#[derive(Clone, Debug)]
pub struct PatrolChase {
    config: ChaseConfig,
    state: BehaviorState,
    rng: ChaCha8Rng,
    /// Rooms still to walk, excluding the room the route was planned from.
    route: Option<Vec<RoomId>>,
    cursor: usize,
    last_seen: Option<RoomId>,
    scan_ticks: u32,
}

impl PatrolChase {
    pub fn new(config: ChaseConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            state: BehaviorState::Patrolling,
            rng,
            route: None,
            cursor: 0,
            last_seen: None,
            scan_ticks: 0,
        }
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn route(&self) -> Option<&[RoomId]> {
        self.route.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn last_seen(&self) -> Option<RoomId> {
        self.last_seen
    }

    pub fn scan_ticks(&self) -> u32 {
        self.scan_ticks
    }

    /// Next room to move into, or `None` to stay put.
    ///
    /// A `None` target means the target is out of play: the agent idles and keeps its state.
    pub fn choose_next_room(
        &mut self,
        graph: &RoomGraph,
        current: RoomId,
        target: Option<RoomId>,
    ) -> Option<RoomId> {
        let target = target?;
        match self.state {
            BehaviorState::Patrolling => self.patrol(graph, current, target, false),
            BehaviorState::Chasing => self.chase(graph, current, target, false),
        }
    }

    /// `chased` is set once this decision has already entered Chasing, so a failed
    /// chase falls back to a wander step instead of looping.
    fn patrol(
        &mut self,
        graph: &RoomGraph,
        current: RoomId,
        target: RoomId,
        chased: bool,
    ) -> Option<RoomId> {
        let seen = self.sees(graph, current, target);
        if !seen {
            self.scan_ticks += 1;
        }
        let scan_due = self.config.scan_delay.is_some_and(|delay| self.scan_ticks >= delay);
        if (seen || scan_due) && !chased {
            self.state = BehaviorState::Chasing;
            self.scan_ticks = 0;
            self.plan_route(graph, current, target);
            debug!(seen, route_len = ?self.route.as_ref().map(Vec::len), "patrol -> chase");
            return self.chase(graph, current, target, true);
        }
        self.wander(graph, current)
    }

    fn chase(
        &mut self,
        graph: &RoomGraph,
        current: RoomId,
        target: RoomId,
        chased: bool,
    ) -> Option<RoomId> {
        if self.last_seen != Some(target) && self.sees(graph, current, target) {
            self.plan_route(graph, current, target);
        }
        if self.last_seen == Some(current) {
            self.last_seen = None;
        }

        let next = match (self.last_seen, self.route.as_deref()) {
            (Some(_), Some(route)) => route.get(self.cursor).copied(),
            _ => None,
        };
        match next {
            Some(room) => {
                self.cursor += 1;
                Some(room)
            }
            None => {
                self.state = BehaviorState::Patrolling;
                self.route = None;
                self.cursor = 0;
                self.last_seen = None;
                debug!("chase -> patrol");
                self.patrol(graph, current, target, chased)
            }
        }
    }

    fn plan_route(&mut self, graph: &RoomGraph, current: RoomId, target: RoomId) {
        self.route = find_path(graph, current, target).map(|path| path.into_steps());
        self.cursor = 0;
        self.last_seen = Some(target);
    }

    fn wander(&mut self, graph: &RoomGraph, current: RoomId) -> Option<RoomId> {
        let doors: Vec<Direction> = graph[current].doors().iter().collect();
        if doors.is_empty() {
            return None;
        }
        let direction = doors[random_index(&mut self.rng, doors.len())];
        graph.neighbor(current, direction)
    }

    fn sees(&self, graph: &RoomGraph, current: RoomId, target: RoomId) -> bool {
        detects(graph, graph[current].pos(), graph[target].pos(), self.config.detection_radius)
    }
}
