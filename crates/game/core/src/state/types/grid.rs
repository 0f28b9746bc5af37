//! Fixed-size arena over the 31×28 board.
//!
//! Every per-tile quantity (walls, pellets, field scores, search bookkeeping)
//! lives in a [`Grid`] indexed by [`Tile`], so membership checks are O(1)
//! array reads instead of hash lookups.

use std::ops::{Index, IndexMut};

use crate::config::GameConfig;

use super::common::Tile;

const ROWS: usize = GameConfig::ROWS;
const COLS: usize = GameConfig::COLS;

/// Dense row-major storage for one value per board tile.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    cells: Box<[[T; COLS]; ROWS]>,
}

/// Wall flags for the board; `true` marks a wall.
pub type WallMask = Grid<bool>;

impl<T: Copy> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(value: T) -> Self {
        Self {
            cells: Box::new([[value; COLS]; ROWS]),
        }
    }

    /// Returns the value at `tile`, or `None` when the tile is off the board.
    #[inline]
    pub fn get(&self, tile: Tile) -> Option<T> {
        tile.in_bounds()
            .then(|| self.cells[tile.row as usize][tile.col as usize])
    }

    /// Overwrites the value at `tile`. Off-board writes are ignored.
    #[inline]
    pub fn set(&mut self, tile: Tile, value: T) {
        if tile.in_bounds() {
            self.cells[tile.row as usize][tile.col as usize] = value;
        }
    }
}

/// Iterates over every on-board tile in row-major order.
pub fn board_tiles() -> impl Iterator<Item = Tile> {
    (0..ROWS as i32).flat_map(|row| (0..COLS as i32).map(move |col| Tile::new(row, col)))
}

impl<T> Grid<T> {
    /// Iterates over `(tile, &value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, &T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, value)| (Tile::new(row as i32, col as i32), value))
        })
    }
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl Grid<bool> {
    /// Number of cells set to `true`.
    pub fn count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&flag| flag).count())
            .sum()
    }

    /// Reads a flag, treating off-board tiles as `default`.
    #[inline]
    pub fn flag_or(&self, tile: Tile, default: bool) -> bool {
        self.get(tile).unwrap_or(default)
    }
}

/// Panics when `tile` is off the board; use [`Grid::get`] for fallible reads.
impl<T> Index<Tile> for Grid<T> {
    type Output = T;

    fn index(&self, tile: Tile) -> &T {
        assert!(tile.in_bounds(), "tile {tile} is off the board");
        &self.cells[tile.row as usize][tile.col as usize]
    }
}

impl<T> IndexMut<Tile> for Grid<T> {
    fn index_mut(&mut self, tile: Tile) -> &mut T {
        assert!(tile.in_bounds(), "tile {tile} is off the board");
        &mut self.cells[tile.row as usize][tile.col as usize]
    }
}
