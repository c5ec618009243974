//! Headless tick loop tying the dungeon, the player and the monster together.
//! This module exists to apply room-entry rules and publish their events in one place.
//! It does not render, read input devices, or read a clock; the host passes elapsed time.

mod events;

pub use events::EventBus;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::Agent;
use crate::behavior::{ChaseConfig, Stimulus};
use crate::error::DungeonError;
use crate::graph::RoomGraph;
use crate::mapgen::seed::{MONSTER_STREAM, stream_rng};
use crate::mapgen::{DungeonConfig, MapGenerator};
use crate::pathfinding::reachable_rooms;
use crate::types::{AgentRole, Direction, GameEvent, RoomId, RoomTag, RunOutcome, SubscriptionId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub chase: ChaseConfig,
    /// Rooms per second.
    pub player_speed: f32,
    /// Rooms per second.
    pub monster_speed: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { chase: ChaseConfig::default(), player_speed: 5.0, monster_speed: 3.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub player_room: RoomId,
    pub monster_room: RoomId,
    pub outcome: RunOutcome,
}

/// Outcome of [`Session::decide`]: the chosen room and any events raised while choosing.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub next: Option<RoomId>,
    pub events: Vec<GameEvent>,
}

pub struct Session {
    graph: RoomGraph,
    player: Agent,
    monster: Agent,
    player_active: bool,
    collected: usize,
    total_collectibles: usize,
    exits_open: bool,
    outcome: RunOutcome,
    tick: u64,
    bus: EventBus,
}

impl Session {
    /// Generates a dungeon and starts a session on it.
    pub fn generate(
        dungeon: &DungeonConfig,
        config: &SessionConfig,
        seed: u64,
    ) -> Result<Self, DungeonError> {
        let generated = MapGenerator::new(dungeon.clone(), seed).generate()?;
        Self::new(generated.graph, config, seed)
    }

    /// The player starts at Home, the monster in the room farthest from it.
    pub fn new(graph: RoomGraph, config: &SessionConfig, seed: u64) -> Result<Self, DungeonError> {
        let home = graph.home().ok_or(DungeonError::MissingHome)?;
        let lair = farthest_room(&graph, home);
        let total_collectibles = graph.count_tagged(RoomTag::Collectible);

        let player = Agent::player(home, config.player_speed);
        let monster = Agent::monster(
            lair,
            config.monster_speed,
            config.chase.clone(),
            stream_rng(seed, MONSTER_STREAM),
        );

        Ok(Self {
            graph,
            player,
            monster,
            player_active: true,
            collected: 0,
            total_collectibles,
            exits_open: total_collectibles == 0,
            outcome: RunOutcome::Running,
            tick: 0,
            bus: EventBus::default(),
        })
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn monster(&self) -> &Agent {
        &self.monster
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    pub fn is_player_active(&self) -> bool {
        self.player_active
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn total_collectibles(&self) -> usize {
        self.total_collectibles
    }

    pub fn exits_open(&self) -> bool {
        self.exits_open
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Advances both agents by `dt` seconds. Each agent either continues its current move,
    /// entering the target room once the move completes, or picks its next room.
    /// Both agents stay frozen once the run is over.
    pub fn tick(&mut self, dt: f32, input: Option<Direction>) -> TickReport {
        self.tick += 1;
        let mut events = Vec::new();

        if self.player_active {
            let stimulus = Stimulus { target_room: None, direction: input };
            self.step_agent(AgentRole::Player, dt, stimulus, &mut events);
        }
        if self.outcome == RunOutcome::Running {
            let stimulus = Stimulus { target_room: self.target_room(), direction: None };
            self.step_agent(AgentRole::Monster, dt, stimulus, &mut events);
        }

        TickReport {
            tick: self.tick,
            events,
            player_room: self.player.room(),
            monster_room: self.monster.room(),
            outcome: self.outcome,
        }
    }

    /// Next room for `role` without starting a move, for hosts that animate movement themselves.
    pub fn decide(&mut self, role: AgentRole, input: Option<Direction>) -> Decision {
        let mut events = Vec::new();
        let next = match role {
            AgentRole::Player if !self.player_active => None,
            AgentRole::Player => self
                .player
                .choose_next_room(&self.graph, Stimulus { target_room: None, direction: input }),
            AgentRole::Monster if self.outcome != RunOutcome::Running => None,
            AgentRole::Monster => {
                let stimulus = Stimulus { target_room: self.target_room(), direction: None };
                let before = self.monster.state();
                let next = self.monster.choose_next_room(&self.graph, stimulus);
                if let Some(state) = self.monster.state().filter(|state| Some(*state) != before) {
                    self.emit(GameEvent::StateChanged { role, state }, &mut events);
                }
                next
            }
        };
        Decision { next, events }
    }

    /// Places `role` in `room` and applies the entry rules. Returns the events raised.
    /// Does nothing once the run is over.
    pub fn enter_room(&mut self, role: AgentRole, room: RoomId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.outcome == RunOutcome::Running {
            self.enter(role, room, &mut events);
        }
        events
    }

    fn target_room(&self) -> Option<RoomId> {
        self.player_active.then(|| self.player.room())
    }

    fn agent_mut(&mut self, role: AgentRole) -> &mut Agent {
        match role {
            AgentRole::Player => &mut self.player,
            AgentRole::Monster => &mut self.monster,
        }
    }

    fn step_agent(
        &mut self,
        role: AgentRole,
        dt: f32,
        stimulus: Stimulus,
        events: &mut Vec<GameEvent>,
    ) {
        let agent = self.agent_mut(role);
        if agent.motion().is_some() {
            if let Some(arrived) = agent.advance(dt) {
                self.enter(role, arrived, events);
            }
            return;
        }

        let before = agent.state();
        let graph = &self.graph;
        let agent = match role {
            AgentRole::Player => &mut self.player,
            AgentRole::Monster => &mut self.monster,
        };
        let next = agent.choose_next_room(graph, stimulus);
        let after = agent.state();
        if let Some(target) = next {
            agent.start_move(target);
        }
        if let Some(state) = after.filter(|state| Some(*state) != before) {
            self.emit(GameEvent::StateChanged { role, state }, events);
        }
    }

    fn enter(&mut self, role: AgentRole, room: RoomId, events: &mut Vec<GameEvent>) {
        debug_assert!(self.graph.get(room).is_some(), "agents only enter rooms of this graph");
        self.agent_mut(role).place(room);

        if role == AgentRole::Player && self.player_active {
            self.apply_player_entry(room, events);
        }
        if self.player_active && self.player.room() == self.monster.room() {
            self.finish(RunOutcome::Caught);
            self.emit(GameEvent::PlayerCaught { room: self.player.room() }, events);
        }
    }

    fn apply_player_entry(&mut self, room: RoomId, events: &mut Vec<GameEvent>) {
        match self.graph[room].tag() {
            RoomTag::Collectible => {
                self.graph.set_tag(room, RoomTag::Normal);
                self.collected += 1;
                let total = self.total_collectibles;
                self.emit(GameEvent::ShardCollected { room, collected: self.collected, total }, events);
                if self.collected >= total && !self.exits_open {
                    self.exits_open = true;
                    self.emit(GameEvent::ExitsOpened, events);
                }
            }
            RoomTag::Exit if self.exits_open => {
                self.finish(RunOutcome::Won);
                self.emit(GameEvent::Won { room }, events);
            }
            RoomTag::Normal | RoomTag::Home | RoomTag::Exit => {}
        }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.player_active = false;
        self.outcome = outcome;
    }

    fn emit(&mut self, event: GameEvent, events: &mut Vec<GameEvent>) {
        debug!(tick = self.tick, ?event, "game event");
        self.bus.publish(&event);
        events.push(event);
    }
}

/// Room with the longest door distance from `origin`; the earliest-created room wins ties.
fn farthest_room(graph: &RoomGraph, origin: RoomId) -> RoomId {
    let distances = reachable_rooms(graph, origin);
    let mut best = origin;
    let mut best_distance = 0;
    for id in graph.room_ids() {
        if let Some(&distance) = distances.get(id)
            && distance > best_distance
        {
            best = id;
            best_distance = distance;
        }
    }
    best
}
