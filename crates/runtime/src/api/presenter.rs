//! Diagnostic sinks for the planner's intermediate results.
//!
//! A [`Presenter`] is injected into the planner; it sees the potential field
//! and the chosen path every time the planner replans. Failures are reported
//! back but never alter the decision.
use game_core::Tile;
use tracing::debug;

use super::errors::PresenterError;
use crate::events::{Event, EventBus, OverlayEvent, Topic};
use crate::providers::ai::PotentialFieldMap;

pub type PresenterResult = std::result::Result<(), PresenterError>;

pub trait Presenter: Send + Sync {
    fn show_potential_field(&self, field: &PotentialFieldMap) -> PresenterResult;

    fn show_path(&self, path: &[Tile]) -> PresenterResult;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_potential_field(&self, _field: &PotentialFieldMap) -> PresenterResult {
        Ok(())
    }

    fn show_path(&self, _path: &[Tile]) -> PresenterResult {
        Ok(())
    }
}

/// Logs a summary of each overlay at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn show_potential_field(&self, field: &PotentialFieldMap) -> PresenterResult {
        let (tiles, min, max) = field.iter().fold(
            (0usize, f32::INFINITY, f32::NEG_INFINITY),
            |(tiles, min, max), (_, score)| (tiles + 1, min.min(score), max.max(score)),
        );
        debug!(target: "runtime::presenter", tiles, min, max, "potential field");
        Ok(())
    }

    fn show_path(&self, path: &[Tile]) -> PresenterResult {
        debug!(
            target: "runtime::presenter",
            len = path.len(),
            next = ?path.first(),
            goal = ?path.last(),
            "path"
        );
        Ok(())
    }
}

/// Publishes overlays on the [`Topic::Overlay`] topic of an [`EventBus`].
#[derive(Clone)]
pub struct BroadcastPresenter {
    bus: EventBus,
}

impl BroadcastPresenter {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    fn publish(&self, event: OverlayEvent) -> PresenterResult {
        if self.bus.subscriber_count(Topic::Overlay) == 0 {
            return Err(PresenterError::Unavailable);
        }
        match self.bus.publish(Event::Overlay(event)) {
            0 => Err(PresenterError::Unavailable),
            _ => Ok(()),
        }
    }
}

impl Presenter for BroadcastPresenter {
    fn show_potential_field(&self, field: &PotentialFieldMap) -> PresenterResult {
        self.publish(OverlayEvent::Field {
            cells: field.overlay_colors(),
        })
    }

    fn show_path(&self, path: &[Tile]) -> PresenterResult {
        self.publish(OverlayEvent::Path {
            tiles: path.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_without_listeners_is_unavailable() {
        let presenter = BroadcastPresenter::new(EventBus::with_capacity(4));
        assert_eq!(
            presenter.show_path(&[Tile::new(1, 1)]),
            Err(PresenterError::Unavailable)
        );
    }

    #[test]
    fn broadcast_reaches_overlay_subscribers() {
        let bus = EventBus::with_capacity(4);
        let mut overlay = bus.subscribe(Topic::Overlay);
        let presenter = BroadcastPresenter::new(bus);

        presenter
            .show_path(&[Tile::new(1, 1), Tile::new(1, 2)])
            .unwrap();

        match overlay.try_recv() {
            Ok(Event::Overlay(OverlayEvent::Path { tiles })) => assert_eq!(tiles.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
