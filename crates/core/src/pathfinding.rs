//! Shortest-path search over the room graph.
//! This module exists so route planning is reusable by agents and by the host's animation layer.
//! It does not own chase policy or decide when a route goes stale.

use std::collections::{BTreeSet, VecDeque};

use slotmap::SecondaryMap;

use crate::graph::RoomGraph;
use crate::types::{Pos, RoomId};

/// Ordered, non-empty room sequence from a start room to a target room, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    rooms: Vec<RoomId>,
}

impl Path {
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    pub fn start(&self) -> RoomId {
        self.rooms[0]
    }

    pub fn target(&self) -> RoomId {
        self.rooms[self.rooms.len() - 1]
    }

    /// Number of rooms, start and target included.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn edge_count(&self) -> usize {
        self.rooms.len() - 1
    }

    /// Rooms to move into, in order, excluding the start room.
    pub fn steps(&self) -> &[RoomId] {
        &self.rooms[1..]
    }

    pub fn into_steps(mut self) -> Vec<RoomId> {
        self.rooms.remove(0);
        self.rooms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    pos: Pos,
    room: RoomId,
}

/// A* with unit edge costs and a Manhattan heuristic in room steps.
/// Returns `None` when `target` cannot be reached from `start`.
pub fn find_path(graph: &RoomGraph, start: RoomId, target: RoomId) -> Option<Path> {
    graph.get(start)?;
    graph.get(target)?;
    if start == target {
        return Some(Path { rooms: vec![start] });
    }

    let goal = graph[target].pos();
    let mut open_set = BTreeSet::new();
    let mut g_score: SecondaryMap<RoomId, u32> = SecondaryMap::new();
    let mut came_from: SecondaryMap<RoomId, RoomId> = SecondaryMap::new();

    let h = step_distance(graph, graph[start].pos(), goal);
    open_set.insert(OpenNode { f: h, h, pos: graph[start].pos(), room: start });
    g_score.insert(start, 0);

    while let Some(current) = open_set.pop_first() {
        if current.room == target {
            return Some(reconstruct_path(&came_from, start, target));
        }
        let cur_g = g_score[current.room];
        if current.f > cur_g + current.h {
            // Stale entry left behind by a later improvement.
            continue;
        }
        for neighbor in graph.neighbors(current.room) {
            let tentative = cur_g + 1;
            if g_score.get(neighbor.id()).is_some_and(|&known| known <= tentative) {
                continue;
            }
            came_from.insert(neighbor.id(), current.room);
            g_score.insert(neighbor.id(), tentative);
            let h = step_distance(graph, neighbor.pos(), goal);
            open_set.insert(OpenNode { f: tentative + h, h, pos: neighbor.pos(), room: neighbor.id() });
        }
    }
    None
}

/// Door-step distance from `start` to every room reachable from it.
pub fn reachable_rooms(graph: &RoomGraph, start: RoomId) -> SecondaryMap<RoomId, u32> {
    let mut distances = SecondaryMap::new();
    if graph.get(start).is_none() {
        return distances;
    }
    let mut queue = VecDeque::from([start]);
    distances.insert(start, 0);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances[current] + 1;
        for neighbor in graph.neighbors(current) {
            if !distances.contains_key(neighbor.id()) {
                distances.insert(neighbor.id(), next_distance);
                queue.push_back(neighbor.id());
            }
        }
    }
    distances
}

/// Manhattan distance measured in room steps.
pub fn step_distance(graph: &RoomGraph, a: Pos, b: Pos) -> u32 {
    (a.x.abs_diff(b.x) + a.y.abs_diff(b.y)) / graph.room_size() as u32
}

fn reconstruct_path(came: &SecondaryMap<RoomId, RoomId>, start: RoomId, target: RoomId) -> Path {
    let mut room = target;
    let mut rooms = vec![room];
    while room != start {
        room = *came.get(room).expect("path must be reconstructible");
        rooms.push(room);
    }
    rooms.reverse();
    Path { rooms }
}
