//! High-level runtime orchestrator.
//!
//! The runtime owns the decision worker, wires up the snapshot, decision and
//! event channels, and exposes a builder-based API for transports.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use game_core::AiConfig;

use crate::api::{
    BroadcastPresenter, DecisionProvider, Presenter, ProviderKind, Result, RuntimeError,
    RuntimeHandle, TracingPresenter,
};
use crate::events::{Event, EventBus, Topic};
use crate::providers::ai::{PlannerProvider, TickDecision};
use crate::workers::DecisionWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub ai: AiConfig,
    /// Tick period when no new snapshot arrives.
    pub decision_interval: Duration,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            decision_interval: Duration::from_millis(100),
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.decision_interval.is_zero() {
            return Err(RuntimeError::InvalidConfig {
                reason: "decision_interval must be positive",
            });
        }
        if self.event_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig {
                reason: "event_buffer_size must be positive",
            });
        }
        if self.ai.planner.stuck_threshold_ms == 0 {
            return Err(RuntimeError::InvalidConfig {
                reason: "stuck_threshold_ms must be positive",
            });
        }
        Ok(())
    }
}

/// Main runtime that hosts the decision worker
///
/// Design: Runtime owns the worker and the outbound decision queue.
/// [`RuntimeHandle`] provides a cloneable façade for transports.
pub struct Runtime {
    handle: RuntimeHandle,
    decision_rx: Option<mpsc::Receiver<TickDecision>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events on `topic`
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Wait for the next decision from the worker.
    ///
    /// Fails once the worker has stopped or the receiver was taken with
    /// [`take_decisions`](Self::take_decisions).
    pub async fn next_decision(&mut self) -> Result<TickDecision> {
        let decisions = self
            .decision_rx
            .as_mut()
            .ok_or(RuntimeError::DecisionChannelClosed)?;
        decisions
            .recv()
            .await
            .ok_or(RuntimeError::DecisionChannelClosed)
    }

    /// Hand the outbound decision queue to an actuator task.
    pub fn take_decisions(&mut self) -> Option<mpsc::Receiver<TickDecision>> {
        self.decision_rx.take()
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.decision_rx);
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    provider: Option<Box<dyn DecisionProvider>>,
    use_planner: bool,
    presenter: Option<Arc<dyn Presenter>>,
    broadcast_overlays: bool,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            provider: None,
            use_planner: false,
            presenter: None,
            broadcast_overlays: false,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom decision provider
    pub fn provider(mut self, provider: impl DecisionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Use a [`PlannerProvider`] built from `config.ai` when no custom
    /// provider is set.
    pub fn planner(mut self) -> Self {
        self.use_planner = true;
        self
    }

    /// Presenter for the built-in planner (default: [`TracingPresenter`])
    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Publish planner overlays on [`Topic::Overlay`] instead of using the
    /// configured presenter.
    pub fn broadcast_overlays(mut self, enable: bool) -> Self {
        self.broadcast_overlays = enable;
        self
    }

    /// Build the runtime and spawn the decision worker
    pub async fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let provider: Box<dyn DecisionProvider> = match self.provider {
            Some(provider) => provider,
            None if self.use_planner => {
                let presenter: Arc<dyn Presenter> = if self.broadcast_overlays {
                    Arc::new(BroadcastPresenter::new(event_bus.clone()))
                } else {
                    self.presenter
                        .unwrap_or_else(|| Arc::new(TracingPresenter))
                };
                Box::new(PlannerProvider::new(self.config.ai.clone()).with_presenter(presenter))
            }
            None => {
                return Err(RuntimeError::ProviderNotSet {
                    kind: ProviderKind::Decision,
                });
            }
        };

        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (decision_tx, decision_rx) = mpsc::channel::<TickDecision>(1);

        let handle = RuntimeHandle::new(snapshot_tx, event_bus.clone());

        let worker = DecisionWorker::new(
            provider,
            snapshot_rx,
            decision_tx,
            event_bus,
            self.config.decision_interval,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            decision_rx: Some(decision_rx),
            worker_handle,
        })
    }
}
