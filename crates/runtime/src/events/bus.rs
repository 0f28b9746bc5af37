//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::OverlayEvent;
use crate::providers::ai::TickDecision;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// One event per emitted decision
    Decision,
    /// Potential field and path overlays
    Overlay,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Decision(TickDecision),
    Overlay(OverlayEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Decision(_) => Topic::Decision,
            Event::Overlay(_) => Topic::Overlay,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    decision: broadcast::Sender<Event>,
    overlay: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decision: broadcast::channel(capacity).0,
            overlay: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Decision => &self.decision,
            Topic::Overlay => &self.overlay,
        }
    }

    /// Publish an event to its corresponding topic.
    ///
    /// Returns the number of subscribers that will see it; zero is normal.
    pub fn publish(&self, event: Event) -> usize {
        let topic = event.topic();
        match self.sender(topic).send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!("No subscribers for topic {:?}", topic);
                0
            }
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
