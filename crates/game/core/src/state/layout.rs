//! Static board layouts described as ASCII art.
//!
//! One text line per board row, one glyph per column:
//!
//! | glyph | meaning |
//! |-------|---------|
//! | `#`   | wall |
//! | `.`   | pellet |
//! | `o`   | super pellet |
//! | ` `   | empty floor |
//! | `P`   | agent start (empty floor) |
//! | `F`   | fruit spawn (empty floor) |
//!
//! Rows shorter than the board and missing rows are filled with walls, so
//! small test boards can be written without padding.

use crate::config::GameConfig;
use crate::error::LayoutError;

use super::types::{Grid, Tile, WallMask};

/// Walls, items and markers parsed from a text layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub walls: WallMask,
    pub pellets: Grid<bool>,
    pub super_pellets: Grid<bool>,
    pub agent: Option<Tile>,
    pub fruit: Option<Tile>,
}

impl Layout {
    /// A board that is all wall.
    pub fn solid() -> Self {
        Self {
            walls: Grid::filled(true),
            pellets: Grid::filled(false),
            super_pellets: Grid::filled(false),
            agent: None,
            fruit: None,
        }
    }

    /// All wall except an empty `rows × cols` floor whose top-left is `origin`.
    pub fn open_rect(origin: Tile, rows: u32, cols: u32) -> Self {
        let mut layout = Self::solid();
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                layout
                    .walls
                    .set(Tile::new(origin.row + row, origin.col + col), false);
            }
        }
        layout
    }

    /// Parses a layout. A single leading newline is ignored so raw string
    /// literals can start on the line after the opening quote.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let text = text.strip_prefix('\n').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() > GameConfig::ROWS {
            return Err(LayoutError::TooManyRows {
                rows: lines.len(),
                max: GameConfig::ROWS,
            });
        }

        let mut layout = Self::solid();
        for (row, line) in lines.iter().enumerate() {
            let cols = line.chars().count();
            if cols > GameConfig::COLS {
                return Err(LayoutError::RowTooWide {
                    row,
                    cols,
                    max: GameConfig::COLS,
                });
            }

            for (col, glyph) in line.chars().enumerate() {
                let tile = Tile::new(row as i32, col as i32);
                match glyph {
                    '#' => {}
                    ' ' => layout.walls.set(tile, false),
                    '.' => {
                        layout.walls.set(tile, false);
                        layout.pellets.set(tile, true);
                    }
                    'o' => {
                        layout.walls.set(tile, false);
                        layout.super_pellets.set(tile, true);
                    }
                    'P' => {
                        if layout.agent.is_some() {
                            return Err(LayoutError::DuplicateAgent { tile });
                        }
                        layout.walls.set(tile, false);
                        layout.agent = Some(tile);
                    }
                    'F' => {
                        layout.walls.set(tile, false);
                        layout.fruit = Some(tile);
                    }
                    glyph => return Err(LayoutError::UnknownGlyph { glyph, tile }),
                }
            }
        }

        Ok(layout)
    }

    /// Pellets plus super pellets still on the board.
    pub fn pellet_count(&self) -> u32 {
        (self.pellets.count() + self.super_pellets.count()) as u32
    }

    /// Places a pellet on a floor tile.
    pub fn with_pellet(mut self, tile: Tile) -> Self {
        if !self.walls.flag_or(tile, true) {
            self.pellets.set(tile, true);
        }
        self
    }

    /// Places a super pellet on a floor tile.
    pub fn with_super_pellet(mut self, tile: Tile) -> Self {
        if !self.walls.flag_or(tile, true) {
            self.super_pellets.set(tile, true);
        }
        self
    }

    /// Turns a tile into wall, clearing any item on it.
    pub fn with_wall(mut self, tile: Tile) -> Self {
        self.walls.set(tile, true);
        self.pellets.set(tile, false);
        self.super_pellets.set(tile, false);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyphs_and_pads_with_walls() {
        let layout = Layout::parse(
            r"
#####
#.oP#
# F #
#####",
        )
        .unwrap();

        assert!(layout.walls[Tile::new(0, 0)]);
        assert!(!layout.walls[Tile::new(1, 1)]);
        assert!(layout.pellets[Tile::new(1, 1)]);
        assert!(layout.super_pellets[Tile::new(1, 2)]);
        assert_eq!(layout.agent, Some(Tile::new(1, 3)));
        assert_eq!(layout.fruit, Some(Tile::new(2, 2)));
        assert!(layout.walls[Tile::new(1, 10)]);
        assert!(layout.walls[Tile::new(20, 3)]);
        assert_eq!(layout.pellet_count(), 2);
    }

    #[test]
    fn rejects_unknown_glyphs() {
        let error = Layout::parse("#x#").unwrap_err();
        assert_eq!(
            error,
            LayoutError::UnknownGlyph {
                glyph: 'x',
                tile: Tile::new(0, 1)
            }
        );
    }

    #[test]
    fn rejects_oversized_rows() {
        let wide = "#".repeat(GameConfig::COLS + 1);
        assert!(matches!(
            Layout::parse(&wide),
            Err(LayoutError::RowTooWide { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_second_agent() {
        assert!(matches!(
            Layout::parse("PP"),
            Err(LayoutError::DuplicateAgent { .. })
        ));
    }

    #[test]
    fn open_rect_carves_floor() {
        let layout = Layout::open_rect(Tile::new(1, 1), 10, 10);
        assert_eq!(layout.walls.count(), GameConfig::ROWS * GameConfig::COLS - 100);
        assert!(!layout.walls[Tile::new(10, 10)]);
        assert!(layout.walls[Tile::new(11, 10)]);
    }
}
