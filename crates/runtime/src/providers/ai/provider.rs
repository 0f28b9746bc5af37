//! Potential-field decision provider.

use std::sync::Arc;

use async_trait::async_trait;
use game_core::{AiConfig, BoardView};
use tokio::time::Instant;

use super::planner::{Planner, TickDecision};
use crate::api::{DecisionProvider, NullPresenter, Presenter, Result};

/// Hosts a [`Planner`] behind the [`DecisionProvider`] seam.
///
/// The planner's field and path overlays go to the injected [`Presenter`].
pub struct PlannerProvider {
    planner: Planner,
    presenter: Arc<dyn Presenter>,
}

impl PlannerProvider {
    pub fn new(config: AiConfig) -> Self {
        Self::from_planner(Planner::new(config))
    }

    pub fn from_planner(planner: Planner) -> Self {
        Self {
            planner,
            presenter: Arc::new(NullPresenter),
        }
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}

impl Default for PlannerProvider {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

#[async_trait]
impl DecisionProvider for PlannerProvider {
    async fn decide(
        &mut self,
        board: &dyn BoardView,
        now: Instant,
    ) -> Result<Option<TickDecision>> {
        let decision = self.planner.tick(board, now, self.presenter.as_ref())?;
        if let Some(decision) = &decision {
            tracing::debug!(
                sequence = %decision.sequence,
                command = %decision.command,
                target = %decision.target,
                state = %decision.state,
                "decision"
            );
        }
        Ok(decision)
    }
}
