//! Topic-based event bus for runtime events.
//!
//! Decisions and presenter overlays are published to separate topics so a
//! transport can follow commands without paying for per-tile overlay traffic.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::OverlayEvent;
