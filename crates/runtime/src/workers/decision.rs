//! Decision worker that turns board snapshots into move commands.
//!
//! Reads the latest snapshot from the watch channel, runs the
//! [`DecisionProvider`], publishes each decision on the EventBus and forwards
//! it to the single-slot outbound queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use game_core::BoardSnapshot;

use crate::api::DecisionProvider;
use crate::events::{Event, EventBus};
use crate::providers::ai::TickDecision;

/// Background task hosting a [`DecisionProvider`].
///
/// Ticks on every snapshot change and on a fixed interval, so stall detection
/// still fires when the transport stops sending. Exits when the snapshot
/// sender or the decision receiver goes away.
pub struct DecisionWorker {
    provider: Box<dyn DecisionProvider>,
    snapshot_rx: watch::Receiver<Option<Arc<BoardSnapshot>>>,
    decision_tx: mpsc::Sender<TickDecision>,
    event_bus: EventBus,
    interval: Duration,
}

impl DecisionWorker {
    pub fn new(
        provider: Box<dyn DecisionProvider>,
        snapshot_rx: watch::Receiver<Option<Arc<BoardSnapshot>>>,
        decision_tx: mpsc::Sender<TickDecision>,
        event_bus: EventBus,
        interval: Duration,
    ) -> Self {
        Self {
            provider,
            snapshot_rx,
            decision_tx,
            event_bus,
            interval,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(interval_ms = self.interval.as_millis() as u64, "DecisionWorker started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                changed = self.snapshot_rx.changed() => {
                    if changed.is_err() {
                        info!("snapshot sender dropped");
                        break;
                    }
                }
                _ = ticker.tick() => {}
                _ = self.decision_tx.closed() => {
                    info!("decision receiver dropped");
                    break;
                }
            }

            if !self.step().await {
                break;
            }
            tokio::task::yield_now().await;
        }

        info!("DecisionWorker stopped");
    }

    /// Runs one tick. Returns false once the outbound queue is closed.
    async fn step(&mut self) -> bool {
        let snapshot = self.snapshot_rx.borrow_and_update().clone();
        let Some(snapshot) = snapshot else {
            return true;
        };

        let result = self.provider.decide(snapshot.as_ref(), Instant::now()).await;
        drop(snapshot);

        match result {
            Ok(Some(decision)) => {
                self.event_bus.publish(Event::Decision(decision));
                if self.decision_tx.send(decision).await.is_err() {
                    debug!("decision receiver dropped while sending");
                    return false;
                }
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "decision provider failed"),
        }
        true
    }
}
