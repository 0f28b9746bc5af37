//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker and planner failures so clients can bubble them up with
//! consistent context.
use std::fmt;

use game_core::{DirectionError, ErrorSeverity, GameError, Tile};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("snapshot channel closed")]
    SnapshotChannelClosed,

    #[error("decision channel closed")]
    DecisionChannelClosed,

    #[error("decision worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid runtime configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error(transparent)]
    Planner(#[from] PlannerError),
}

#[derive(Debug, Copy, Clone)]
pub enum ProviderKind {
    Decision,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Decision => "decision",
        };
        write!(f, "{}", label)
    }
}

/// Goal selection could not produce a target this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("snapshot reports no ghosts")]
    NoGhosts,

    #[error("agent at {tile} has no walkable neighbour")]
    Trapped { tile: Tile },
}

impl GameError for GoalError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }
}

/// Failure of a planner tick that aborts the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Direction(#[from] DirectionError),
}

impl GameError for PlannerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::Direction(error) => error.severity(),
        }
    }
}

/// Failure to deliver diagnostics. Never changes a decision.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PresenterError {
    #[error("presenter has no audience")]
    Unavailable,

    #[error("presenter rejected update: {0}")]
    Rejected(String),
}

impl GameError for PresenterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }
}
