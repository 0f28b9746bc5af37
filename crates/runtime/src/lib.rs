//! Runtime orchestration for the agent decision core.
//!
//! This crate wires together the potential-field planner, the decision
//! provider abstraction, distance lookups and the worker task into a cohesive
//! runtime API. Transports embed [`Runtime`] to feed board snapshots in
//! through [`RuntimeHandle`] and read move commands out.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for decisions and overlays
//! - [`providers`] holds the planner and its building blocks
//! - [`oracle`] provides distance lookups
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    BroadcastPresenter, DecisionProvider, GoalError, HoldPositionProvider, NullPresenter,
    PlannerError, Presenter, PresenterError, PresenterResult, ProviderKind, Result, RuntimeError,
    RuntimeHandle, TracingPresenter,
};
pub use events::{Event, EventBus, OverlayEvent, Topic};
pub use oracle::{DistanceOracle, DistanceResolver, MazeDistanceTable};
pub use providers::ai::{
    AdjacencyProbabilities, DecisionState, GhostMotionPredictor, Goal, GoalSelector, MotionReading,
    Planner, PlannerProvider, PotentialField, PotentialFieldMap, TickDecision, find_path,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
