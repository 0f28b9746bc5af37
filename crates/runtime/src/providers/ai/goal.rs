//! Goal definition and selection logic.
//!
//! A goal is the tile the agent routes toward this tick. Selection scans the
//! tiles around the agent and picks the one with the lowest combined cost of
//! field score, travel distance and predicted ghost traffic.

use game_core::{BoardView, GhostColor, GoalConfig, Tile, board_tiles};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::field::PotentialFieldMap;
use super::prediction::GhostMotionPredictor;
use crate::api::GoalError;
use crate::oracle::DistanceResolver;

/// A concrete target for the path search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Goal {
    /// Cheapest tile by field, distance and predicted ghost traffic.
    Seek { tile: Tile, cost: f32 },

    /// Tile farthest from the threatening ghosts, chosen when one is too close.
    Evade { tile: Tile, threat: GhostColor },

    /// Random neighbour when no candidate tile exists.
    Explore { tile: Tile },
}

impl Goal {
    pub fn tile(&self) -> Tile {
        match *self {
            Goal::Seek { tile, .. } | Goal::Evade { tile, .. } | Goal::Explore { tile } => tile,
        }
    }
}

/// Picks one [`Goal`] per tick.
#[derive(Clone, Copy, Debug)]
pub struct GoalSelector<'a> {
    config: &'a GoalConfig,
}

impl<'a> GoalSelector<'a> {
    pub fn new(config: &'a GoalConfig) -> Self {
        Self { config }
    }

    pub fn select(
        &self,
        board: &dyn BoardView,
        field: &PotentialFieldMap,
        predictor: &GhostMotionPredictor,
        distances: &DistanceResolver,
        rng: &mut impl Rng,
    ) -> Result<Goal, GoalError> {
        if board.ghosts().is_empty() {
            return Err(GoalError::NoGhosts);
        }

        let radius = self.config.radius_for(board.pellets_remaining()) as f32;

        let mut best = self.cheapest(board, field, predictor, distances, |distance| {
            distance <= radius
        });
        let attractive = best.is_some_and(|(tile, _)| field.score(tile).unwrap_or(0.0) < 0.0);
        if self.config.widen_when_idle && !attractive {
            debug!(radius, "nothing attractive in radius; scanning whole board");
            best = self
                .cheapest(board, field, predictor, distances, |_| true)
                .or(best);
        }

        let Some((tile, cost)) = best else {
            return self.explore(board, rng);
        };

        if let Some(evade) = self.evade(board, tile, distances) {
            return Ok(evade);
        }
        Ok(Goal::Seek { tile, cost })
    }

    /// Lowest-cost candidate in scan order; ties keep the first tile.
    fn cheapest(
        &self,
        board: &dyn BoardView,
        field: &PotentialFieldMap,
        predictor: &GhostMotionPredictor,
        distances: &DistanceResolver,
        in_range: impl Fn(f32) -> bool,
    ) -> Option<(Tile, f32)> {
        let agent = board.agent_location();
        let mut best: Option<(Tile, f32)> = None;

        for (tile, score) in field.iter() {
            if tile == agent {
                continue;
            }
            let distance = distances.distance(agent, tile);
            if !in_range(distance) {
                continue;
            }
            let cost = score
                + distance
                + self.config.prediction_weight * predictor.threat_occupancy(board, tile);
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((tile, cost));
            }
        }

        best
    }

    /// Switches to flight when a threatening ghost is close to both the agent
    /// and the chosen goal.
    fn evade(&self, board: &dyn BoardView, goal: Tile, distances: &DistanceResolver) -> Option<Goal> {
        let radius = self.config.evade_radius;
        if radius <= 0.0 {
            return None;
        }
        let agent = board.agent_location();
        let threat = board
            .ghosts()
            .iter()
            .filter(|ghost| ghost.is_threat())
            .map(|ghost| (ghost, distances.distance(agent, ghost.tile)))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(ghost, _)| *ghost)?;

        if distances.distance(goal, threat.tile) > radius {
            return None;
        }

        let mut farthest: Option<(Tile, f32)> = None;
        for tile in board_tiles().filter(|&tile| board.is_walkable(tile) && tile != agent) {
            let clearance = board
                .ghosts()
                .iter()
                .filter(|ghost| ghost.is_threat())
                .map(|ghost| distances.distance(tile, ghost.tile))
                .fold(f32::INFINITY, f32::min);
            if farthest.is_none_or(|(_, best)| clearance > best) {
                farthest = Some((tile, clearance));
            }
        }

        farthest.map(|(tile, clearance)| {
            debug!(%tile, clearance, threat = %threat.color, "evading");
            Goal::Evade {
                tile,
                threat: threat.color,
            }
        })
    }

    fn explore(&self, board: &dyn BoardView, rng: &mut impl Rng) -> Result<Goal, GoalError> {
        let agent = board.agent_location();
        board
            .open_neighbors(agent)
            .choose(rng)
            .map(|&(_, tile)| Goal::Explore { tile })
            .ok_or(GoalError::Trapped { tile: agent })
    }
}
