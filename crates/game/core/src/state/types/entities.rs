use super::common::{Direction, Tile};

/// Identity tag of a ghost. Each color has a distinct chase personality.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GhostColor {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl GhostColor {
    pub const ALL: [GhostColor; 4] = [
        GhostColor::Red,
        GhostColor::Pink,
        GhostColor::Cyan,
        GhostColor::Orange,
    ];

    /// Dense index used for per-color arrays.
    pub const fn index(self) -> usize {
        match self {
            GhostColor::Red => 0,
            GhostColor::Pink => 1,
            GhostColor::Cyan => 2,
            GhostColor::Orange => 3,
        }
    }
}

/// A ghost as reported by the game server for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ghost {
    pub color: GhostColor,
    pub tile: Tile,
    /// Vulnerable: touching it is rewarded rather than fatal.
    pub frightened: bool,
    /// Still inside (or leaving) the ghost pen.
    pub spawning: bool,
    pub heading: Option<Direction>,
}

impl Ghost {
    pub fn new(color: GhostColor, tile: Tile) -> Self {
        Self {
            color,
            tile,
            frightened: false,
            spawning: false,
            heading: None,
        }
    }

    pub fn frightened(mut self, frightened: bool) -> Self {
        self.frightened = frightened;
        self
    }

    pub fn spawning(mut self, spawning: bool) -> Self {
        self.spawning = spawning;
        self
    }

    pub fn heading(mut self, heading: Option<Direction>) -> Self {
        self.heading = heading;
        self
    }

    /// True when contact with this ghost would cost a life.
    #[inline]
    pub fn is_threat(&self) -> bool {
        !self.frightened && !self.spawning
    }
}

/// Bonus fruit currently on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fruit {
    pub tile: Tile,
    /// Steps left before the fruit disappears.
    pub remaining_steps: u32,
    /// Total lifetime in steps when it spawned.
    pub duration: u32,
}

impl Fruit {
    pub fn new(tile: Tile, remaining_steps: u32, duration: u32) -> Self {
        Self {
            tile,
            remaining_steps,
            duration,
        }
    }

    /// Fraction of the lifetime still left, in `[0, 1]`.
    ///
    /// A zero duration reports a fresh fruit.
    pub fn freshness(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (self.remaining_steps as f32 / self.duration as f32).clamp(0.0, 1.0)
    }
}

/// Global ghost behavior mode broadcast by the server.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    /// Ghosts retreat to their home corners.
    Scatter,
    /// Ghosts pursue the agent.
    #[default]
    Chase,
    /// Game paused by the server.
    Paused,
}
