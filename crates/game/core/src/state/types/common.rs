use std::fmt;

use crate::config::GameConfig;
use crate::error::DirectionError;

/// Discrete grid position expressed in (row, col) tile coordinates.
///
/// Rows grow downwards and columns grow to the right, matching the layout the
/// game server streams. Offsets may leave the board; such tiles are never
/// walkable and every board query treats them as walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub row: i32,
    pub col: i32,
}

impl Tile {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns true when the tile lies on the 31×28 board.
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0
            && self.col >= 0
            && self.row < GameConfig::ROWS as i32
            && self.col < GameConfig::COLS as i32
    }

    /// The tile one step away in `direction` (may be off the board).
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    pub const fn manhattan(self, other: Tile) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn euclidean(self, other: Tile) -> f32 {
        let dr = (self.row - other.row) as f32;
        let dc = (self.col - other.col) as f32;
        (dr * dr + dc * dc).sqrt()
    }

    /// True when `other` is exactly one axis-aligned step away.
    #[inline]
    pub const fn is_adjacent(self, other: Tile) -> bool {
        self.manhattan(other) == 1
    }

    /// Direction of the single step from `self` to `other`.
    ///
    /// Fails fast with [`DirectionError::InvalidDelta`] when the two tiles are
    /// not axis-aligned neighbours.
    pub fn direction_to(self, other: Tile) -> Result<Direction, DirectionError> {
        Direction::from_delta(other.row - self.row, other.col - self.col)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Tile {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// One of the four axis-aligned headings on the board.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Scan order used wherever neighbours are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) delta of a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn from_delta(delta_row: i32, delta_col: i32) -> Result<Self, DirectionError> {
        match (delta_row, delta_col) {
            (-1, 0) => Ok(Direction::Up),
            (1, 0) => Ok(Direction::Down),
            (0, -1) => Ok(Direction::Left),
            (0, 1) => Ok(Direction::Right),
            _ => Err(DirectionError::InvalidDelta {
                delta_row,
                delta_col,
            }),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Heading after a quarter turn counter-clockwise (as seen on screen).
    pub const fn left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Heading after a quarter turn clockwise (as seen on screen).
    pub const fn right(self) -> Self {
        self.left().opposite()
    }
}

/// Command handed to the actuator layer, at most once per control tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveCommand {
    Up,
    Down,
    Left,
    Right,
    /// Unplanned move issued while recovering from a stall.
    RandomWalk,
    /// No decision available this tick.
    #[default]
    None,
}

impl MoveCommand {
    /// Returns true for the four directional commands.
    pub const fn is_move(self) -> bool {
        matches!(
            self,
            MoveCommand::Up | MoveCommand::Down | MoveCommand::Left | MoveCommand::Right
        )
    }

    pub const fn direction(self) -> Option<Direction> {
        match self {
            MoveCommand::Up => Some(Direction::Up),
            MoveCommand::Down => Some(Direction::Down),
            MoveCommand::Left => Some(Direction::Left),
            MoveCommand::Right => Some(Direction::Right),
            MoveCommand::RandomWalk | MoveCommand::None => None,
        }
    }
}

impl From<Direction> for MoveCommand {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveCommand::Up,
            Direction::Down => MoveCommand::Down,
            Direction::Left => MoveCommand::Left,
            Direction::Right => MoveCommand::Right,
        }
    }
}

/// Monotonic sequence number stamped on snapshots by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_round_trips_through_delta() {
        for direction in Direction::ALL {
            let (dr, dc) = direction.delta();
            assert_eq!(Direction::from_delta(dr, dc), Ok(direction));
        }
    }

    #[test]
    fn diagonal_delta_is_rejected() {
        assert_eq!(
            Direction::from_delta(1, 1),
            Err(DirectionError::InvalidDelta {
                delta_row: 1,
                delta_col: 1
            })
        );
        assert!(Direction::from_delta(0, 0).is_err());
        assert!(Direction::from_delta(2, 0).is_err());
    }

    #[test]
    fn turns_are_perpendicular() {
        for direction in Direction::ALL {
            assert_ne!(direction.left(), direction);
            assert_ne!(direction.left(), direction.opposite());
            assert_eq!(direction.right(), direction.left().opposite());
            assert_eq!(direction.left().right(), direction);
        }
        assert_eq!(Direction::Up.left(), Direction::Left);
        assert_eq!(Direction::Up.right(), Direction::Right);
    }

    #[test]
    fn tile_bounds_and_steps() {
        assert!(Tile::new(0, 0).in_bounds());
        assert!(Tile::new(30, 27).in_bounds());
        assert!(!Tile::new(31, 0).in_bounds());
        assert!(!Tile::new(0, -1).in_bounds());
        assert_eq!(Tile::new(5, 5).step(Direction::Down), Tile::new(6, 5));
        assert_eq!(
            Tile::new(5, 5).direction_to(Tile::new(5, 4)),
            Ok(Direction::Left)
        );
        assert!(Tile::new(5, 5).direction_to(Tile::new(6, 6)).is_err());
    }
}
