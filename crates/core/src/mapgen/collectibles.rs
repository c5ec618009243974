//! Collectible placement over interior rooms.

use rand_chacha::ChaCha8Rng;

use crate::graph::RoomGraph;
use crate::types::{RoomId, RoomTag};

use super::seed::random_index;

/// Retags `count` random Normal rooms as Collectible.
///
/// Callers guarantee at least `count` Normal rooms exist; otherwise this never returns.
pub(super) fn scatter_collectibles(
    graph: &mut RoomGraph,
    rng: &mut ChaCha8Rng,
    count: usize,
) -> Vec<RoomId> {
    debug_assert!(graph.count_tagged(RoomTag::Normal) >= count);
    let candidates = graph.room_ids();
    let mut placed = Vec::with_capacity(count);
    while placed.len() < count {
        let id = candidates[random_index(rng, candidates.len())];
        if graph[id].tag() == RoomTag::Normal {
            graph.set_tag(id, RoomTag::Collectible);
            placed.push(id);
        }
    }
    placed
}
