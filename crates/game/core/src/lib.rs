//! Board model and tunables shared by the decision core.
//!
//! `game-core` defines the grid types, the per-tick [`BoardSnapshot`], the
//! read-only [`BoardView`] seam the planner queries, and the [`AiConfig`]
//! tunables. It performs no I/O and spawns nothing; the runtime and content
//! crates depend on the types re-exported here.
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use config::{
    AiConfig, ColorWeights, DistanceMetric, FieldConfig, GameConfig, GhostDecay, GoalConfig,
    ModeMultipliers, PelletBreakpoint, PlannerConfig, PredictionConfig, RadiusBreakpoint,
    SearchConfig,
};
pub use env::{BoardView, Neighbors};
pub use error::{DirectionError, ErrorSeverity, GameError, LayoutError, SnapshotError};
pub use state::{
    BoardSnapshot, BoardSnapshotBuilder, Direction, Fruit, GameMode, Ghost, GhostColor, Grid,
    Layout, MoveCommand, Tick, Tile, WallMask, board_tiles,
};
