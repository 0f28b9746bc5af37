//! Potential-field navigation for the agent.
//!
//! Every replanning tick runs the same pipeline:
//!
//! 1. **Field**: score every walkable tile; ghosts repel, pellets, super
//!    pellets and fruit attract ([`PotentialField`]).
//! 2. **Prediction**: estimate where each ghost steps next from its heading
//!    and the junction it stands on ([`GhostMotionPredictor`]).
//! 3. **Goal**: pick the cheapest nearby tile, or flee when a ghost is too
//!    close ([`GoalSelector`]).
//! 4. **Route**: A* to the goal over the field ([`find_path`]).
//!
//! [`Planner`] wraps the pipeline in a small state machine with stuck
//! detection, and [`PlannerProvider`] exposes it as a
//! [`crate::DecisionProvider`].

pub mod field;
pub mod goal;
pub mod pathfinding;
pub mod planner;
pub mod prediction;
pub mod provider;

pub use field::{PotentialField, PotentialFieldMap};
pub use goal::{Goal, GoalSelector};
pub use pathfinding::find_path;
pub use planner::{DecisionState, Planner, TickDecision};
pub use prediction::{AdjacencyProbabilities, GhostHeadings, GhostMotionPredictor, MotionReading};
pub use provider::PlannerProvider;
