//! Read-only views of the board.
//!
//! Decision logic is written against [`BoardView`] rather than the concrete
//! [`BoardSnapshot`](crate::BoardSnapshot), so adapters for other transports
//! can feed the planner without copying into a snapshot first.
mod board;

pub use board::{BoardView, Neighbors};
