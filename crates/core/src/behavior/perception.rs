use crate::graph::RoomGraph;
use crate::types::Pos;

/// Straight-line distance between two rooms in room steps, rounded to the nearest step.
pub fn detection_distance(graph: &RoomGraph, a: Pos, b: Pos) -> u32 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx.hypot(dy) / f64::from(graph.room_size())).round() as u32
}

pub fn detects(graph: &RoomGraph, watcher: Pos, target: Pos, radius: u32) -> bool {
    detection_distance(graph, watcher, target) <= radius
}
