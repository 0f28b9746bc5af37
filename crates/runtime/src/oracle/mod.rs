//! Distance lookups shared by the field, goal selection and path search.

mod distance;

pub use distance::{DistanceOracle, DistanceResolver, MazeDistanceTable};
