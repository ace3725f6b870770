use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only picture of a round, everything a renderer needs to pick a sprite per cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub mines_left: i64,
    pub state: RoundState,
    pub tiles: Array2<Tile>,
}

impl Snapshot {
    pub fn from_round(round: &Round) -> Self {
        let grid = round.grid();

        Self {
            size: grid.size(),
            mine_count: grid.mine_count(),
            mines_left: grid.mines_left(),
            state: round.state(),
            tiles: grid.cells().map(Cell::tile),
        }
    }

    /// `Unknown` for off-grid coordinates.
    pub fn tile_at(&self, coords: Coord2) -> Tile {
        if in_bounds(coords, self.size) {
            self.tiles[coords.to_nd_index()]
        } else {
            Tile::Unknown
        }
    }
}

/// One text row per `y`, starting from `y = 0`.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (size_x, size_y) = self.size;
        for y in 0..size_y {
            for x in 0..size_x {
                write!(f, "{}", self.tile_at((x, y)).as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Implemented by whatever draws the board, the core only ever hands it snapshots.
pub trait Presenter {
    fn draw(&mut self, snapshot: &Snapshot);
}
