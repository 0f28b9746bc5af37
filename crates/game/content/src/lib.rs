//! Data-driven board layouts, scenarios and tuning files.
//!
//! This crate houses static content and the loaders that read it:
//! - Maze layouts (ASCII text, including the bundled classic maze)
//! - Board scenarios (RON: a layout plus ghosts, fruit and mode)
//! - Decision-core tuning (TOML, deserialized into [`game_core::AiConfig`])
//!
//! Content is turned into `game-core` types at load time and never appears in
//! the runtime as raw text.

/// The classic 31×28 maze, with the agent start marked `P` and the fruit
/// spawn marked `F`.
pub const CLASSIC_MAZE: &str = include_str!("../data/maps/classic.txt");

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader, ScenarioLoader};
