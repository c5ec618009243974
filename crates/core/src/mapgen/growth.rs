//! Randomized branch growth from Home with bounds, occupancy and anti-monotony checks.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::error::DungeonError;
use crate::graph::RoomGraph;
use crate::types::{Direction, Pos, RoomId, RoomTag};

use super::config::DungeonConfig;
use super::seed::shuffled_directions;

/// Straight-run bookkeeping for one branch walk.
#[derive(Clone, Copy, Debug, Default)]
struct RunTracker {
    previous: Option<Direction>,
    repeats: u32,
}

impl RunTracker {
    fn allows(self, direction: Direction, max_same_direction: u32) -> bool {
        self.previous != Some(direction) || self.repeats + 1 < max_same_direction
    }

    fn record(&mut self, direction: Direction) {
        if self.previous == Some(direction) {
            self.repeats += 1;
        } else {
            self.repeats = 0;
        }
        self.previous = Some(direction);
    }
}

/// Walks `length` steps from `start`, returning the rooms created in order.
/// Steps with no acceptable direction are skipped, so the result may be shorter.
pub(super) fn grow_branch(
    graph: &mut RoomGraph,
    rng: &mut ChaCha8Rng,
    config: &DungeonConfig,
    start: RoomId,
    length: usize,
) -> Result<Vec<RoomId>, DungeonError> {
    let mut current = start;
    let mut run = RunTracker::default();
    let mut built = Vec::with_capacity(length);

    for step in 0..length {
        let Some((direction, pos)) = pick_step(graph, rng, config, graph[current].pos(), run)
        else {
            trace!(step, from = ?graph[current].pos(), "branch step abandoned");
            continue;
        };

        let next = graph.add(pos, RoomTag::Normal)?;
        graph.connect(current, next, direction)?;
        run.record(direction);
        current = next;
        built.push(next);
    }

    if let Some(&tip) = built.last() {
        graph.set_tag(tip, RoomTag::Exit);
    }
    Ok(built)
}

fn pick_step(
    graph: &RoomGraph,
    rng: &mut ChaCha8Rng,
    config: &DungeonConfig,
    from: Pos,
    run: RunTracker,
) -> Option<(Direction, Pos)> {
    shuffled_directions(rng).into_iter().find_map(|direction| {
        let candidate = graph.step(from, direction);
        let acceptable = config.in_bounds(candidate)
            && !graph.contains(candidate)
            && run.allows(direction, config.max_same_direction);
        acceptable.then_some((direction, candidate))
    })
}
