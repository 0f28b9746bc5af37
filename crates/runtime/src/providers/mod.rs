//! Decision provider implementations.

pub mod ai;

pub use ai::PlannerProvider;
