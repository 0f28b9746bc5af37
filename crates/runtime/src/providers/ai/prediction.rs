//! Ghost motion tracking and next-tile prediction.
//!
//! The predictor remembers where each ghost was on the previous tick, infers
//! the heading it arrived with, and turns that heading plus the local junction
//! shape into a probability distribution over the ghost's next tile.

use arrayvec::ArrayVec;
use game_core::{BoardView, Direction, GhostColor, PredictionConfig, Tile};
use tracing::warn;

/// How a ghost moved since the previous observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionReading {
    /// Same tile as last tick, or first sighting.
    Stationary,
    /// One unit step; the direction the ghost travelled to arrive.
    Moved(Direction),
    /// Any other displacement (respawn, missed ticks).
    Displaced,
}

/// One reading per ghost color; `None` when the ghost is absent this tick.
pub type GhostHeadings = [Option<MotionReading>; 4];

/// Distribution over a ghost's next tile.
///
/// A degenerate junction (no or one open neighbour) yields the single entry
/// `(position, -1.0)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyProbabilities {
    entries: ArrayVec<(Tile, f32), 4>,
}

impl AdjacencyProbabilities {
    pub const DEGENERATE: f32 = -1.0;

    fn degenerate(position: Tile) -> Self {
        let mut entries = ArrayVec::new();
        entries.push((position, Self::DEGENERATE));
        Self { entries }
    }

    pub fn entries(&self) -> &[(Tile, f32)] {
        &self.entries
    }

    pub fn is_degenerate(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|&(_, weight)| weight == Self::DEGENERATE)
    }

    /// Probability that the ghost steps onto `tile`. Zero for degenerate
    /// distributions.
    pub fn probability_of(&self, tile: Tile) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.entries
            .iter()
            .filter(|(candidate, _)| *candidate == tile)
            .map(|(_, weight)| weight)
            .sum()
    }

    pub fn total(&self) -> f32 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }
}

/// Relationship of a neighbour to the ghost's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relative {
    Forward,
    Lateral,
    Backward,
}

fn relative(heading: Direction, direction: Direction) -> Relative {
    if direction == heading {
        Relative::Forward
    } else if direction == heading.opposite() {
        Relative::Backward
    } else {
        Relative::Lateral
    }
}

/// Tracks ghost positions across ticks and predicts their next tiles.
#[derive(Clone, Debug, Default)]
pub struct GhostMotionPredictor {
    config: PredictionConfig,
    last_tiles: [Option<Tile>; 4],
    predictions: [Option<AdjacencyProbabilities>; 4],
}

impl GhostMotionPredictor {
    pub fn new(config: PredictionConfig) -> Self {
        Self {
            config,
            last_tiles: [None; 4],
            predictions: Default::default(),
        }
    }

    /// Compares ghost tiles with the previous tick and remembers the new ones.
    pub fn update(&mut self, board: &dyn BoardView) -> GhostHeadings {
        let mut headings: GhostHeadings = [None; 4];
        let mut seen = [None; 4];

        for ghost in board.ghosts() {
            let slot = ghost.color.index();
            let reading = match self.last_tiles[slot] {
                None => MotionReading::Stationary,
                Some(previous) if previous == ghost.tile => MotionReading::Stationary,
                Some(previous) => previous
                    .direction_to(ghost.tile)
                    .map_or(MotionReading::Displaced, MotionReading::Moved),
            };
            headings[slot] = Some(reading);
            seen[slot] = Some(ghost.tile);
        }

        self.last_tiles = seen;
        headings
    }

    /// Distribution over the next tile of a ghost at `position` that last
    /// travelled in `previous_heading`.
    pub fn adjacent_probabilities(
        &self,
        board: &dyn BoardView,
        position: Tile,
        previous_heading: Option<Direction>,
    ) -> AdjacencyProbabilities {
        let open = board.open_neighbors(position);
        if open.len() < 2 {
            warn!(
                tile = %position,
                open = open.len(),
                "degenerate junction; no prediction possible"
            );
            return AdjacencyProbabilities::degenerate(position);
        }

        let weights: ArrayVec<(Tile, f32), 4> = match previous_heading {
            None => open.iter().map(|&(_, tile)| (tile, 1.0)).collect(),
            Some(heading) => {
                let forward_open = open.iter().any(|&(direction, _)| direction == heading);
                open.iter()
                    .map(|&(direction, tile)| {
                        let role = relative(heading, direction);
                        (tile, self.weight(open.len(), forward_open, role))
                    })
                    .collect()
            }
        };

        let total: f32 = weights.iter().map(|(_, weight)| weight).sum();
        let entries = if total > 0.0 {
            weights
                .into_iter()
                .map(|(tile, weight)| (tile, weight / total))
                .collect()
        } else {
            let uniform = 1.0 / open.len() as f32;
            open.iter().map(|&(_, tile)| (tile, uniform)).collect()
        };

        AdjacencyProbabilities { entries }
    }

    fn weight(&self, open: usize, forward_open: bool, role: Relative) -> f32 {
        let c = &self.config;
        match (open, forward_open, role) {
            (2, true, Relative::Forward) => c.tunnel_forward,
            (2, true, _) => c.tunnel_backward,
            (2, false, Relative::Backward) => c.corner_backward,
            (2, false, _) => c.corner_lateral,
            (3, true, Relative::Forward) => c.tee_forward,
            (3, true, Relative::Lateral) => c.tee_lateral,
            (3, true, Relative::Backward) => c.tee_backward,
            (3, false, Relative::Backward) => c.fork_backward,
            (3, false, _) => c.fork_lateral,
            (_, _, Relative::Forward) => c.cross_forward,
            (_, _, Relative::Lateral) => c.cross_lateral,
            (_, _, Relative::Backward) => c.cross_backward,
        }
    }

    /// Stores a fresh distribution for every ghost that moved.
    ///
    /// Displaced ghosts get a heading-free distribution; absent ghosts lose
    /// theirs; stationary ghosts keep the last one.
    pub fn update_predictions(&mut self, board: &dyn BoardView, headings: &GhostHeadings) {
        for color in GhostColor::ALL {
            let slot = color.index();
            let Some(tile) = self.last_tiles[slot] else {
                self.predictions[slot] = None;
                continue;
            };
            match headings[slot] {
                Some(MotionReading::Moved(direction)) => {
                    self.predictions[slot] =
                        Some(self.adjacent_probabilities(board, tile, Some(direction)));
                }
                Some(MotionReading::Displaced) => {
                    self.predictions[slot] = Some(self.adjacent_probabilities(board, tile, None));
                }
                Some(MotionReading::Stationary) => {}
                None => self.predictions[slot] = None,
            }
        }
    }

    /// [`update`](Self::update) followed by
    /// [`update_predictions`](Self::update_predictions).
    pub fn observe(&mut self, board: &dyn BoardView) -> GhostHeadings {
        let headings = self.update(board);
        self.update_predictions(board, &headings);
        headings
    }

    pub fn prediction(&self, color: GhostColor) -> Option<&AdjacencyProbabilities> {
        self.predictions[color.index()].as_ref()
    }

    /// Expected number of threatening ghosts stepping onto `tile` next tick.
    pub fn threat_occupancy(&self, board: &dyn BoardView, tile: Tile) -> f32 {
        board
            .ghosts()
            .iter()
            .filter(|ghost| !ghost.frightened)
            .filter_map(|ghost| self.prediction(ghost.color))
            .map(|distribution| distribution.probability_of(tile))
            .sum()
    }
}
