//! Asynchronous abstraction for sourcing agent decisions.
//!
//! Runtime users plug in [`DecisionProvider`] implementations so the worker
//! can run the full planner, a scripted fixture, or a no-op policy.
use async_trait::async_trait;
use game_core::BoardView;
use tokio::time::Instant;

use super::errors::Result;
use crate::providers::ai::TickDecision;

/// Trait for producing at most one decision per tick.
#[async_trait]
pub trait DecisionProvider: Send {
    /// Decide for the given snapshot at time `now`.
    ///
    /// `Ok(None)` skips the tick without emitting a command.
    async fn decide(&mut self, board: &dyn BoardView, now: Instant)
    -> Result<Option<TickDecision>>;
}

/// A provider that never moves.
/// Useful for testing or as a fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPositionProvider;

#[async_trait]
impl DecisionProvider for HoldPositionProvider {
    async fn decide(
        &mut self,
        _board: &dyn BoardView,
        _now: Instant,
    ) -> Result<Option<TickDecision>> {
        Ok(None)
    }
}
