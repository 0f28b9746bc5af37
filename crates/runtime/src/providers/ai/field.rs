//! Potential field ("avoidance map") over the walkable board.
//!
//! Every walkable tile gets a score of `ghost − pellet − fruit − momentum`:
//! positive scores repel, negative scores attract, and a tile nothing cares
//! about scores exactly zero. The map is rebuilt from scratch every tick.

use arrayvec::ArrayVec;
use game_core::{BoardView, FieldConfig, Ghost, Grid, Tile, board_tiles};

use crate::oracle::DistanceResolver;

/// Per-tile desirability scores for one tick. Lower is better.
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialFieldMap {
    scores: Grid<f32>,
    walkable: Grid<bool>,
}

impl PotentialFieldMap {
    /// Score of a walkable tile; `None` for walls and off-board tiles.
    pub fn score(&self, tile: Tile) -> Option<f32> {
        self.walkable
            .flag_or(tile, false)
            .then(|| self.scores[tile])
    }

    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.walkable.flag_or(tile, false)
    }

    /// `(tile, score)` for every walkable tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, f32)> + '_ {
        board_tiles()
            .filter(|&tile| self.walkable[tile])
            .map(|tile| (tile, self.scores[tile]))
    }

    /// RGB overlay for presenters: red repels, green attracts, both clamped
    /// to 255.
    pub fn overlay_colors(&self) -> Vec<(Tile, [u8; 3])> {
        self.iter()
            .map(|(tile, score)| {
                let intensity = score.abs().min(255.0) as u8;
                let color = if score > 0.0 {
                    [intensity, 0, 0]
                } else {
                    [0, intensity, 0]
                };
                (tile, color)
            })
            .collect()
    }
}

/// Computes [`PotentialFieldMap`]s from a board and [`FieldConfig`].
#[derive(Clone, Copy, Debug)]
pub struct PotentialField<'a> {
    config: &'a FieldConfig,
}

impl<'a> PotentialField<'a> {
    pub fn new(config: &'a FieldConfig) -> Self {
        Self { config }
    }

    pub fn compute(&self, board: &dyn BoardView, distances: &DistanceResolver) -> PotentialFieldMap {
        let walkable = board.walkable_tiles();
        let mut scores = Grid::filled(0.0_f32);
        let lures = self.threatened_super_pellets(board, distances);
        let ahead = board
            .agent_heading()
            .map(|heading| board.agent_location().step(heading))
            .filter(|&tile| board.is_walkable(tile));

        for tile in board_tiles().filter(|&tile| walkable[tile]) {
            let mut score = self.ghost_contribution(board, tile, distances)
                - self.pellet_contribution(board, tile)
                - self.super_pellet_contribution(board, tile, distances)
                - self.fruit_contribution(board, tile, distances);

            if !board.has_super_pellet(tile) {
                score -= self.lure_contribution(&lures, tile, distances);
            }
            if ahead == Some(tile) {
                score -= self.config.momentum_bonus;
            }
            scores[tile] = score;
        }

        PotentialFieldMap { scores, walkable }
    }

    /// Summed repulsion of every ghost at `tile`. Frightened ghosts attract.
    pub fn ghost_contribution(
        &self,
        board: &dyn BoardView,
        tile: Tile,
        distances: &DistanceResolver,
    ) -> f32 {
        let threshold = self
            .config
            .effective_ghost_threshold(board.pellets_remaining());
        let mode = self.config.mode_multipliers.multiplier(board.current_mode());

        board
            .ghosts()
            .iter()
            .map(|ghost| {
                let distance = distances.distance(tile, ghost.tile);
                if distance >= threshold {
                    return 0.0;
                }
                let mut value = self.config.ghost_boost / self.config.ghost_decay.divisor(distance)
                    * self.config.color_weights.weight(ghost.color)
                    * mode;
                if ghost.frightened {
                    value *= -self.config.frightened_weight;
                }
                if ghost.spawning {
                    value /= self.config.spawning_divisor;
                }
                value
            })
            .sum()
    }

    /// Reward of a normal pellet at `tile`, zero elsewhere.
    pub fn pellet_contribution(&self, board: &dyn BoardView, tile: Tile) -> f32 {
        if !board.has_pellet(tile) {
            return 0.0;
        }
        let base = self.config.pellet_boost
            * self.config.pellet_multiplier(board.pellets_remaining());
        if self.config.cluster_weight == 0.0 {
            return base;
        }
        base * (1.0 + self.config.cluster_weight * self.cluster_density(board, tile))
    }

    /// Reward of a super pellet at `tile`, zero elsewhere.
    ///
    /// Full strength only while a threatening ghost is near the pellet.
    pub fn super_pellet_contribution(
        &self,
        board: &dyn BoardView,
        tile: Tile,
        distances: &DistanceResolver,
    ) -> f32 {
        if !board.has_super_pellet(tile) {
            return 0.0;
        }
        if self.is_threatened(board, tile, distances) {
            self.config.super_pellet_boost
        } else {
            self.config.suppressed_super_pellet_boost
        }
    }

    /// Reward of the fruit, fading with distance and age.
    pub fn fruit_contribution(
        &self,
        board: &dyn BoardView,
        tile: Tile,
        distances: &DistanceResolver,
    ) -> f32 {
        let Some(fruit) = board.fruit() else {
            return 0.0;
        };
        let value = self.config.fruit_boost * fruit.freshness();
        let distance = distances.distance(tile, fruit.tile);
        if distance <= 0.0 {
            value
        } else if distance < self.config.fruit_threshold {
            value / (2.0 * distance)
        } else {
            0.0
        }
    }

    fn lure_contribution(
        &self,
        lures: &[Tile],
        tile: Tile,
        distances: &DistanceResolver,
    ) -> f32 {
        lures
            .iter()
            .map(|&pellet| distances.distance(tile, pellet))
            .filter(|&distance| distance > 0.0 && distance < self.config.super_pellet_lure_radius)
            .map(|distance| self.config.super_pellet_lure / distance)
            .sum()
    }

    fn threatened_super_pellets(
        &self,
        board: &dyn BoardView,
        distances: &DistanceResolver,
    ) -> ArrayVec<Tile, 8> {
        if self.config.super_pellet_lure == 0.0 {
            return ArrayVec::new();
        }
        board_tiles()
            .filter(|&tile| board.has_super_pellet(tile))
            .filter(|&tile| self.is_threatened(board, tile, distances))
            .take(8)
            .collect()
    }

    fn is_threatened(&self, board: &dyn BoardView, tile: Tile, distances: &DistanceResolver) -> bool {
        board
            .ghosts()
            .iter()
            .filter(|ghost| ghost.is_threat())
            .any(|ghost: &Ghost| {
                distances.distance(tile, ghost.tile) < self.config.super_pellet_threat_radius
            })
    }

    /// Share of items in the `(2r+1)²` window around `tile`.
    fn cluster_density(&self, board: &dyn BoardView, tile: Tile) -> f32 {
        let radius = self.config.cluster_radius as i32;
        let side = 2 * radius + 1;
        let mut items = 0u32;
        for row in tile.row - radius..=tile.row + radius {
            for col in tile.col - radius..=tile.col + radius {
                let probe = Tile::new(row, col);
                if board.has_pellet(probe) || board.has_super_pellet(probe) {
                    items += 1;
                }
            }
        }
        items as f32 / (side * side) as f32
    }
}
