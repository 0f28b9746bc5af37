pub mod common;
pub mod entities;
pub mod grid;

pub use common::{Direction, MoveCommand, Tick, Tile};
pub use entities::{Fruit, GameMode, Ghost, GhostColor};
pub use grid::{Grid, WallMask, board_tiles};
