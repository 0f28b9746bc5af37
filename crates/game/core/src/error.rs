//! Common error infrastructure for game-core.
//!
//! Domain errors are small `thiserror` enums. Each implements [`GameError`] so
//! callers can decide between aborting a tick and recovering without matching
//! on every variant.

use crate::state::Tile;

/// Severity level of an error, used for recovery decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Transient condition; the next tick may succeed.
    ///
    /// Examples: no ghosts reported yet, no route this tick
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: malformed board layout
    Validation,

    /// Broken internal contract; indicates a bug in the caller.
    ///
    /// Examples: stepping toward a non-adjacent tile
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;
}

/// A single-step move was requested between tiles that are not 4-neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionError {
    #[error("delta ({delta_row}, {delta_col}) is not a single axis-aligned step")]
    InvalidDelta { delta_row: i32, delta_col: i32 },
}

impl GameError for DirectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }
}

/// Errors raised while building a [`crate::BoardSnapshot`] from a text layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutError {
    #[error("layout has {rows} rows, at most {max} allowed")]
    TooManyRows { rows: usize, max: usize },

    #[error("layout row {row} has {cols} columns, at most {max} allowed")]
    RowTooWide { row: usize, cols: usize, max: usize },

    #[error("unknown layout glyph {glyph:?} at {tile}")]
    UnknownGlyph { glyph: char, tile: Tile },

    #[error("layout places the agent more than once (second at {tile})")]
    DuplicateAgent { tile: Tile },
}

impl GameError for LayoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Errors raised while assembling a snapshot programmatically.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotError {
    #[error("ghost list is full (max: {max})")]
    GhostListFull { max: usize },

    #[error("{tile} is off the board")]
    OutOfBounds { tile: Tile },

    #[error("snapshot has no agent position")]
    MissingAgent,
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
