//! Event payloads for the overlay topic.

use game_core::Tile;
use serde::{Deserialize, Serialize};

/// Diagnostics published by [`crate::BroadcastPresenter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverlayEvent {
    /// RGB colour per walkable tile: red repels, green attracts.
    Field { cells: Vec<(Tile, [u8; 3])> },

    /// Route chosen by the path search, excluding the agent tile.
    Path { tiles: Vec<Tile> },
}
