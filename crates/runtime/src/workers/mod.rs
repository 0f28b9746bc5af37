//! Worker tasks that back the runtime orchestration.
//!
//! The decision worker turns board snapshots into move commands.

mod decision;

pub use decision::DecisionWorker;
