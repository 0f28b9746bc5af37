use arrayvec::ArrayVec;

use crate::state::{
    BoardSnapshot, Direction, Fruit, GameMode, Ghost, Grid, Tick, Tile, board_tiles,
};

/// Open 4-neighbours of a tile, paired with the direction that reaches them.
pub type Neighbors = ArrayVec<(Direction, Tile), 4>;

/// Board state queried by the decision core at one tick.
///
/// Tiles outside the board are walls for every query.
pub trait BoardView: Send + Sync {
    /// Transport sequence number of the tick this view describes.
    fn sequence(&self) -> Tick;

    fn is_wall(&self, tile: Tile) -> bool;
    fn has_pellet(&self, tile: Tile) -> bool;
    fn has_super_pellet(&self, tile: Tile) -> bool;

    fn fruit(&self) -> Option<Fruit>;
    fn ghosts(&self) -> &[Ghost];
    fn agent_location(&self) -> Tile;
    fn agent_heading(&self) -> Option<Direction>;
    fn pellets_remaining(&self) -> u32;
    fn current_mode(&self) -> GameMode;
    fn lives_remaining(&self) -> u8;

    fn fruit_present(&self) -> bool {
        self.fruit().is_some()
    }

    fn fruit_location(&self) -> Option<Tile> {
        self.fruit().map(|fruit| fruit.tile)
    }

    /// Zero when no fruit is on the board.
    fn fruit_remaining_steps(&self) -> u32 {
        self.fruit().map_or(0, |fruit| fruit.remaining_steps)
    }

    /// Zero when no fruit is on the board.
    fn fruit_duration(&self) -> u32 {
        self.fruit().map_or(0, |fruit| fruit.duration)
    }

    fn is_walkable(&self, tile: Tile) -> bool {
        tile.in_bounds() && !self.is_wall(tile)
    }

    /// Walkable neighbours in `Direction::ALL` order.
    fn open_neighbors(&self, tile: Tile) -> Neighbors {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, tile.step(direction)))
            .filter(|&(_, next)| self.is_walkable(next))
            .collect()
    }

    /// Mask of walkable tiles.
    fn walkable_tiles(&self) -> Grid<bool> {
        let mut mask = Grid::filled(false);
        for tile in board_tiles() {
            mask.set(tile, self.is_walkable(tile));
        }
        mask
    }
}

impl BoardView for BoardSnapshot {
    fn sequence(&self) -> Tick {
        self.sequence
    }

    fn is_wall(&self, tile: Tile) -> bool {
        self.walls().flag_or(tile, true)
    }

    fn has_pellet(&self, tile: Tile) -> bool {
        self.pellets().flag_or(tile, false)
    }

    fn has_super_pellet(&self, tile: Tile) -> bool {
        self.super_pellets().flag_or(tile, false)
    }

    fn fruit(&self) -> Option<Fruit> {
        BoardSnapshot::fruit(self)
    }

    fn ghosts(&self) -> &[Ghost] {
        BoardSnapshot::ghosts(self)
    }

    fn agent_location(&self) -> Tile {
        self.agent()
    }

    fn agent_heading(&self) -> Option<Direction> {
        BoardSnapshot::agent_heading(self)
    }

    fn pellets_remaining(&self) -> u32 {
        BoardSnapshot::pellets_remaining(self)
    }

    fn current_mode(&self) -> GameMode {
        self.mode()
    }

    fn lives_remaining(&self) -> u8 {
        self.lives()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GhostColor, Layout};

    fn corridor() -> BoardSnapshot {
        BoardSnapshot::from_layout(
            r"
#####
#P. #
## ##
#####",
        )
        .unwrap()
        .ghost(Ghost::new(GhostColor::Cyan, Tile::new(1, 3)))
        .build()
        .unwrap()
    }

    #[test]
    fn off_board_tiles_are_walls() {
        let board = corridor();
        assert!(board.is_wall(Tile::new(-1, 0)));
        assert!(board.is_wall(Tile::new(0, 28)));
        assert!(!board.is_walkable(Tile::new(31, 0)));
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let board = corridor();
        let neighbors = board.open_neighbors(Tile::new(1, 2));
        assert_eq!(
            neighbors.as_slice(),
            &[
                (Direction::Down, Tile::new(2, 2)),
                (Direction::Left, Tile::new(1, 1)),
                (Direction::Right, Tile::new(1, 3)),
            ]
        );
    }

    #[test]
    fn walkable_mask_matches_floor() {
        let board = corridor();
        let mask = board.walkable_tiles();
        assert_eq!(mask.count(), 4);
        assert!(mask[Tile::new(2, 2)]);
        assert!(!mask[Tile::new(0, 0)]);
    }

    #[test]
    fn fruit_accessors_default_to_zero() {
        let board = BoardSnapshot::builder(Layout::open_rect(Tile::ORIGIN, 2, 2))
            .agent(Tile::ORIGIN)
            .build()
            .unwrap();
        assert!(!board.fruit_present());
        assert_eq!(board.fruit_remaining_steps(), 0);
        assert_eq!(board.fruit_duration(), 0);
    }
}
