//! Cloneable façade for feeding the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing: the transport publishes board
//! snapshots through it and subscribers stream events from specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use game_core::BoardSnapshot;

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    snapshot_tx: Arc<watch::Sender<Option<Arc<BoardSnapshot>>>>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        snapshot_tx: watch::Sender<Option<Arc<BoardSnapshot>>>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            snapshot_tx: Arc::new(snapshot_tx),
            event_bus,
        }
    }

    /// Replace the latest board snapshot.
    ///
    /// Older unread snapshots are overwritten; the worker only ever sees the
    /// most recent one.
    pub fn publish_snapshot(&self, snapshot: BoardSnapshot) -> Result<()> {
        self.snapshot_tx
            .send(Some(Arc::new(snapshot)))
            .map_err(|_| RuntimeError::SnapshotChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Decision` - One event per emitted decision
    /// - `Topic::Overlay` - Potential field and path overlays
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut decisions = handle.subscribe(Topic::Decision);
    /// while let Ok(event) = decisions.recv().await {
    ///     // Forward the command to the actuator
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
