use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use game_core::{BoardView, DistanceMetric, Grid, Tile, board_tiles};

/// Optional cache of tile-to-tile distances.
pub trait DistanceOracle: Send + Sync {
    /// `None` when the pair is unknown to the cache.
    fn lookup(&self, from: Tile, to: Tile) -> Option<f32>;
}

/// Distance function used by the decision core.
///
/// Consults the oracle first and falls back to the geometric metric on a miss.
#[derive(Clone, Default)]
pub struct DistanceResolver {
    oracle: Option<Arc<dyn DistanceOracle>>,
    metric: DistanceMetric,
}

impl DistanceResolver {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            oracle: None,
            metric,
        }
    }

    pub fn with_oracle(metric: DistanceMetric, oracle: Arc<dyn DistanceOracle>) -> Self {
        Self {
            oracle: Some(oracle),
            metric,
        }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn distance(&self, from: Tile, to: Tile) -> f32 {
        self.oracle
            .as_ref()
            .and_then(|oracle| oracle.lookup(from, to))
            .unwrap_or_else(|| self.metric.between(from, to))
    }
}

impl std::fmt::Debug for DistanceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceResolver")
            .field("metric", &self.metric)
            .field("cached", &self.oracle.is_some())
            .finish()
    }
}

/// In-memory all-pairs maze distances, computed by BFS from every walkable tile.
#[derive(Clone, Debug)]
pub struct MazeDistanceTable {
    rows: HashMap<Tile, Grid<u16>>,
}

impl MazeDistanceTable {
    const UNREACHABLE: u16 = u16::MAX;

    /// Builds the table for the walls of `board`.
    pub fn build(board: &dyn BoardView) -> Self {
        let walkable = board.walkable_tiles();
        let rows = board_tiles()
            .filter(|&tile| walkable[tile])
            .map(|source| (source, Self::bfs(board, source)))
            .collect();
        Self { rows }
    }

    fn bfs(board: &dyn BoardView, source: Tile) -> Grid<u16> {
        let mut distances = Grid::filled(Self::UNREACHABLE);
        let mut queue = VecDeque::from([source]);
        distances[source] = 0;

        while let Some(tile) = queue.pop_front() {
            let next_distance = distances[tile].saturating_add(1);
            for (_, next) in board.open_neighbors(tile) {
                if distances[next] == Self::UNREACHABLE {
                    distances[next] = next_distance;
                    queue.push_back(next);
                }
            }
        }

        distances
    }

    /// Number of source tiles in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DistanceOracle for MazeDistanceTable {
    fn lookup(&self, from: Tile, to: Tile) -> Option<f32> {
        let distance = self.rows.get(&from)?.get(to)?;
        (distance != Self::UNREACHABLE).then_some(distance as f32)
    }
}
