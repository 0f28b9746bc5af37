//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod presenter;
pub mod providers;

pub use errors::{GoalError, PlannerError, PresenterError, ProviderKind, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use presenter::{BroadcastPresenter, NullPresenter, Presenter, PresenterResult, TracingPresenter};
pub use providers::{DecisionProvider, HoldPositionProvider};
