//! A* over the walkable board with a field-shaped heuristic.
//!
//! The heuristic is `distance(node, goal) + field[node]`. It is deliberately
//! inadmissible: routes bend away from ghosts and toward pellets instead of
//! being strictly shortest. Nodes are therefore re-opened whenever a cheaper
//! route to them turns up.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use game_core::{BoardView, Grid, SearchConfig, Tile};
use tracing::debug;

use super::field::PotentialFieldMap;
use crate::oracle::DistanceResolver;

/// Open-set entry. Ordered by `f`, then by insertion order.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    f: f32,
    sequence: u64,
    g: u32,
    tile: Tile,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Least-cost route from `start` to `goal`, excluding `start` and including
/// `goal`.
///
/// Returns an empty path when `start == goal`, when either end is not
/// walkable, when the goal is unreachable, or when the expansion cap is hit.
pub fn find_path(
    start: Tile,
    goal: Tile,
    board: &dyn BoardView,
    field: &PotentialFieldMap,
    distances: &DistanceResolver,
    config: &SearchConfig,
) -> Vec<Tile> {
    if start == goal || !board.is_walkable(start) || !board.is_walkable(goal) {
        return Vec::new();
    }

    let max_expansions = config
        .max_expansions
        .unwrap_or_else(|| board.walkable_tiles().count() * 4);
    let heuristic =
        |tile: Tile| distances.distance(tile, goal) + field.score(tile).unwrap_or(0.0);

    let mut best_g = Grid::filled(u32::MAX);
    let mut came_from: Grid<Option<Tile>> = Grid::filled(None);
    let mut open = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expansions = 0usize;

    best_g[start] = 0;
    open.push(Reverse(SearchNode {
        f: heuristic(start),
        sequence,
        g: 0,
        tile: start,
    }));

    while let Some(Reverse(node)) = open.pop() {
        if node.g > best_g[node.tile] {
            continue;
        }
        if node.tile == goal {
            return reconstruct(&came_from, start, goal);
        }
        if expansions >= max_expansions {
            debug!(%start, %goal, expansions, "path search hit expansion cap");
            return Vec::new();
        }
        expansions += 1;

        let g = node.g + 1;
        for (_, next) in board.open_neighbors(node.tile) {
            if g >= best_g[next] {
                continue;
            }
            best_g[next] = g;
            came_from[next] = Some(node.tile);
            sequence += 1;
            open.push(Reverse(SearchNode {
                f: g as f32 + heuristic(next),
                sequence,
                g,
                tile: next,
            }));
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &Grid<Option<Tile>>, start: Tile, goal: Tile) -> Vec<Tile> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[current] {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
