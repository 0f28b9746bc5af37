//! Per-tick decision state machine.
//!
//! Each tick ends in one of three states:
//!
//! - **Stuck**: the last move did not take effect for longer than the stuck
//!   threshold, so a random neighbour is tried.
//! - **Traveling**: the current target is one step away; keep heading there.
//! - **Replanning**: rebuild the field, pick a goal and route to it. The first
//!   tile of the route becomes the new target in the same tick.

use std::time::Duration;

use game_core::{AiConfig, BoardView, MoveCommand, Tick, Tile};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::field::PotentialField;
use super::goal::GoalSelector;
use super::pathfinding::find_path;
use super::prediction::GhostMotionPredictor;
use crate::api::{GoalError, PlannerError, Presenter};
use crate::oracle::DistanceResolver;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DecisionState {
    Traveling,
    Replanning,
    Stuck,
}

/// Output of one planner tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickDecision {
    /// Sequence of the snapshot the decision was made from.
    pub sequence: Tick,
    pub command: MoveCommand,
    /// Tile the command heads for; the agent tile when no move is possible.
    pub target: Tile,
    pub state: DecisionState,
}

/// Stateful decision core: potential field, goal selection, path search and
/// stuck detection.
pub struct Planner {
    config: AiConfig,
    predictor: GhostMotionPredictor,
    distances: DistanceResolver,
    rng: StdRng,
    target: Option<Tile>,
    last_command: MoveCommand,
    last_agent: Option<Tile>,
    motionless_since: Option<Instant>,
}

impl Planner {
    pub fn new(config: AiConfig) -> Self {
        let distances = DistanceResolver::new(config.goal.distance_metric);
        Self::with_distances(config, distances)
    }

    /// Uses `distances` instead of the bare configured metric, e.g. one backed
    /// by a [`crate::oracle::MazeDistanceTable`].
    pub fn with_distances(config: AiConfig, distances: DistanceResolver) -> Self {
        let rng = match config.planner.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            predictor: GhostMotionPredictor::new(config.prediction),
            config,
            distances,
            rng,
            target: None,
            last_command: MoveCommand::None,
            last_agent: None,
            motionless_since: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn target(&self) -> Option<Tile> {
        self.target
    }

    pub fn last_command(&self) -> MoveCommand {
        self.last_command
    }

    pub fn predictor(&self) -> &GhostMotionPredictor {
        &self.predictor
    }

    fn stuck_threshold(&self) -> Duration {
        Duration::from_millis(self.config.planner.stuck_threshold_ms)
    }

    /// Runs one decision tick against `board` at time `now`.
    ///
    /// `Ok(None)` means the tick was skipped (the snapshot has no ghosts).
    pub fn tick(
        &mut self,
        board: &dyn BoardView,
        now: Instant,
        presenter: &dyn Presenter,
    ) -> Result<Option<TickDecision>, PlannerError> {
        let agent = board.agent_location();
        // The stall clock only runs while a move command is in flight.
        if self.last_agent != Some(agent) || !self.last_command.is_move() {
            self.last_agent = Some(agent);
            self.motionless_since = Some(now);
        }
        self.predictor.observe(board);

        if board.ghosts().is_empty() {
            warn!(sequence = %board.sequence(), "snapshot has no ghosts; skipping tick");
            self.motionless_since = Some(now);
            return Ok(None);
        }

        let motionless_since = *self.motionless_since.get_or_insert(now);
        if self.last_command.is_move()
            && now.duration_since(motionless_since) > self.stuck_threshold()
        {
            self.motionless_since = Some(now);
            return Ok(Some(self.random_walk(board)));
        }

        if let Some(target) = self.target
            && agent.manhattan(target) == 1
        {
            let direction = agent.direction_to(target)?;
            return Ok(Some(self.emit(
                board,
                MoveCommand::from(direction),
                target,
                DecisionState::Traveling,
            )));
        }

        self.replan(board, presenter)
    }

    fn replan(
        &mut self,
        board: &dyn BoardView,
        presenter: &dyn Presenter,
    ) -> Result<Option<TickDecision>, PlannerError> {
        let agent = board.agent_location();
        let field = PotentialField::new(&self.config.field).compute(board, &self.distances);
        if let Err(error) = presenter.show_potential_field(&field) {
            warn!(%error, "presenter rejected potential field");
        }

        let goal = match GoalSelector::new(&self.config.goal).select(
            board,
            &field,
            &self.predictor,
            &self.distances,
            &mut self.rng,
        ) {
            Ok(goal) => goal,
            Err(GoalError::NoGhosts) => {
                warn!(sequence = %board.sequence(), "snapshot has no ghosts; skipping tick");
                return Ok(None);
            }
            Err(GoalError::Trapped { tile }) => {
                debug!(%tile, "agent trapped; holding position");
                self.target = None;
                return Ok(Some(self.emit(
                    board,
                    MoveCommand::None,
                    tile,
                    DecisionState::Replanning,
                )));
            }
        };
        debug!(?goal, "goal selected");

        let path = find_path(
            agent,
            goal.tile(),
            board,
            &field,
            &self.distances,
            &self.config.search,
        );
        if let Err(error) = presenter.show_path(&path) {
            warn!(%error, "presenter rejected path");
        }

        let next = match path.first() {
            Some(&tile) => Some(tile),
            None => {
                debug!(goal = %goal.tile(), "no route to goal; picking a random neighbour");
                self.random_neighbor(board)
            }
        };
        let Some(next) = next else {
            self.target = None;
            return Ok(Some(self.emit(
                board,
                MoveCommand::None,
                agent,
                DecisionState::Replanning,
            )));
        };

        let direction = agent.direction_to(next)?;
        Ok(Some(self.emit(
            board,
            MoveCommand::from(direction),
            next,
            DecisionState::Replanning,
        )))
    }

    fn random_walk(&mut self, board: &dyn BoardView) -> TickDecision {
        let agent = board.agent_location();
        match self.random_neighbor(board) {
            Some(tile) => {
                debug!(%agent, target = %tile, "stuck; random walk");
                self.emit(board, MoveCommand::RandomWalk, tile, DecisionState::Stuck)
            }
            None => {
                self.target = None;
                self.emit(board, MoveCommand::None, agent, DecisionState::Stuck)
            }
        }
    }

    fn random_neighbor(&mut self, board: &dyn BoardView) -> Option<Tile> {
        board
            .open_neighbors(board.agent_location())
            .choose(&mut self.rng)
            .map(|&(_, tile)| tile)
    }

    fn emit(
        &mut self,
        board: &dyn BoardView,
        command: MoveCommand,
        target: Tile,
        state: DecisionState,
    ) -> TickDecision {
        if command != MoveCommand::None {
            self.target = Some(target);
        }
        self.last_command = command;
        TickDecision {
            sequence: board.sequence(),
            command,
            target,
            state,
        }
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("distances", &self.distances)
            .field("target", &self.target)
            .field("last_command", &self.last_command)
            .field("last_agent", &self.last_agent)
            .finish_non_exhaustive()
    }
}
