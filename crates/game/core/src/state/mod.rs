//! Board state as reported by the game server.
//!
//! A [`BoardSnapshot`] is an immutable picture of one server tick. The
//! runtime shares snapshots behind `Arc` and never mutates them; a fresh
//! snapshot replaces the old one on every update.
mod layout;
pub mod types;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::SnapshotError;

pub use layout::Layout;
pub use types::{
    Direction, Fruit, GameMode, Ghost, GhostColor, Grid, MoveCommand, Tick, Tile, WallMask,
    board_tiles,
};

/// Everything the decision core knows about one tick of the game.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardSnapshot {
    /// Server tick this snapshot was taken at.
    pub sequence: Tick,
    walls: WallMask,
    pellets: Grid<bool>,
    super_pellets: Grid<bool>,
    fruit: Option<Fruit>,
    ghosts: ArrayVec<Ghost, { GameConfig::MAX_GHOSTS }>,
    agent: Tile,
    agent_heading: Option<Direction>,
    lives: u8,
    mode: GameMode,
    pellets_remaining: u32,
}

impl BoardSnapshot {
    /// Starts a snapshot from a static layout.
    pub fn builder(layout: Layout) -> BoardSnapshotBuilder {
        BoardSnapshotBuilder::new(layout)
    }

    /// Parses `text` as a [`Layout`] and starts a snapshot from it.
    pub fn from_layout(text: &str) -> Result<BoardSnapshotBuilder, crate::LayoutError> {
        Ok(Self::builder(Layout::parse(text)?))
    }

    pub fn walls(&self) -> &WallMask {
        &self.walls
    }

    pub fn pellets(&self) -> &Grid<bool> {
        &self.pellets
    }

    pub fn super_pellets(&self) -> &Grid<bool> {
        &self.super_pellets
    }

    pub fn fruit(&self) -> Option<Fruit> {
        self.fruit
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn agent(&self) -> Tile {
        self.agent
    }

    pub fn agent_heading(&self) -> Option<Direction> {
        self.agent_heading
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn pellets_remaining(&self) -> u32 {
        self.pellets_remaining
    }

    /// Copy of this snapshot with the agent moved, as the server would report
    /// on the next tick. Items under the new tile are left in place.
    pub fn with_agent_at(&self, tile: Tile, sequence: Tick) -> Self {
        let mut next = self.clone();
        next.agent_heading = self.agent.direction_to(tile).ok();
        next.agent = tile;
        next.sequence = sequence;
        next
    }
}

/// Assembles a [`BoardSnapshot`] from a layout plus dynamic entities.
#[derive(Clone, Debug)]
pub struct BoardSnapshotBuilder {
    layout: Layout,
    sequence: Tick,
    fruit: Option<Fruit>,
    ghosts: Vec<Ghost>,
    agent: Option<Tile>,
    agent_heading: Option<Direction>,
    lives: u8,
    mode: GameMode,
    pellets_remaining: Option<u32>,
}

impl BoardSnapshotBuilder {
    fn new(layout: Layout) -> Self {
        Self {
            agent: layout.agent,
            layout,
            sequence: Tick::ZERO,
            fruit: None,
            ghosts: Vec::new(),
            agent_heading: None,
            lives: 3,
            mode: GameMode::default(),
            pellets_remaining: None,
        }
    }

    pub fn sequence(mut self, sequence: Tick) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn agent(mut self, tile: Tile) -> Self {
        self.agent = Some(tile);
        self
    }

    pub fn agent_heading(mut self, heading: Option<Direction>) -> Self {
        self.agent_heading = heading;
        self
    }

    pub fn ghost(mut self, ghost: Ghost) -> Self {
        self.ghosts.push(ghost);
        self
    }

    pub fn ghosts(mut self, ghosts: impl IntoIterator<Item = Ghost>) -> Self {
        self.ghosts.extend(ghosts);
        self
    }

    /// Places a fruit. Without an explicit tile the layout's `F` marker is used.
    pub fn fruit(mut self, remaining_steps: u32, duration: u32) -> Self {
        self.fruit = self
            .layout
            .fruit
            .map(|tile| Fruit::new(tile, remaining_steps, duration));
        self
    }

    pub fn fruit_at(mut self, fruit: Fruit) -> Self {
        self.fruit = Some(fruit);
        self
    }

    pub fn lives(mut self, lives: u8) -> Self {
        self.lives = lives;
        self
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the pellet counter. By default it is the number of pellets
    /// and super pellets on the layout.
    pub fn pellets_remaining(mut self, count: u32) -> Self {
        self.pellets_remaining = Some(count);
        self
    }

    pub fn build(self) -> Result<BoardSnapshot, SnapshotError> {
        let agent = self.agent.ok_or(SnapshotError::MissingAgent)?;
        if !agent.in_bounds() {
            return Err(SnapshotError::OutOfBounds { tile: agent });
        }

        let mut ghosts = ArrayVec::new();
        for ghost in self.ghosts {
            if !ghost.tile.in_bounds() {
                return Err(SnapshotError::OutOfBounds { tile: ghost.tile });
            }
            ghosts
                .try_push(ghost)
                .map_err(|_| SnapshotError::GhostListFull {
                    max: GameConfig::MAX_GHOSTS,
                })?;
        }

        let pellets_remaining = self
            .pellets_remaining
            .unwrap_or_else(|| self.layout.pellet_count());

        Ok(BoardSnapshot {
            sequence: self.sequence,
            walls: self.layout.walls,
            pellets: self.layout.pellets,
            super_pellets: self.layout.super_pellets,
            fruit: self.fruit,
            ghosts,
            agent,
            agent_heading: self.agent_heading,
            lives: self.lives,
            mode: self.mode,
            pellets_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = r"
######
#P..F#
#.##.#
#o...#
######";

    #[test]
    fn builder_uses_layout_markers() {
        let snapshot = BoardSnapshot::from_layout(ROOM)
            .unwrap()
            .fruit(30, 60)
            .ghost(Ghost::new(GhostColor::Red, Tile::new(3, 4)))
            .build()
            .unwrap();

        assert_eq!(snapshot.agent(), Tile::new(1, 1));
        assert_eq!(snapshot.fruit().map(|f| f.tile), Some(Tile::new(1, 4)));
        assert_eq!(snapshot.pellets_remaining(), 8);
        assert_eq!(snapshot.ghosts().len(), 1);
        assert_eq!(snapshot.lives(), 3);
    }

    #[test]
    fn rejects_fifth_ghost() {
        let error = BoardSnapshot::from_layout(ROOM)
            .unwrap()
            .ghosts((0..5).map(|_| Ghost::new(GhostColor::Pink, Tile::new(1, 2))))
            .build()
            .unwrap_err();
        assert_eq!(error, SnapshotError::GhostListFull { max: 4 });
    }

    #[test]
    fn requires_an_agent() {
        let error = BoardSnapshot::builder(Layout::open_rect(Tile::ORIGIN, 3, 3))
            .build()
            .unwrap_err();
        assert_eq!(error, SnapshotError::MissingAgent);
    }

    #[test]
    fn moving_the_agent_records_heading() {
        let snapshot = BoardSnapshot::from_layout(ROOM).unwrap().build().unwrap();
        let next = snapshot.with_agent_at(Tile::new(1, 2), Tick::new(1));
        assert_eq!(next.agent(), Tile::new(1, 2));
        assert_eq!(next.agent_heading(), Some(Direction::Right));
        assert_eq!(next.sequence, Tick::new(1));
    }
}
