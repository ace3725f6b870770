use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds. Flags, explosions and visibility are markers on top of this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Sentinel for queries outside the grid, never stored.
    Invalid,
    Empty,
    Number,
    Mine,
}

impl CellKind {
    /// Whether flood reveal may uncover a cell of this kind.
    pub const fn is_floodable(self) -> bool {
        matches!(self, Self::Empty | Self::Number)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    kind: CellKind,
    position: Coord2,
    adjacent_mines: u8,
    flagged: bool,
    exploded: bool,
    revealed: bool,
}

impl Cell {
    pub(crate) const fn empty(position: Coord2) -> Self {
        Self {
            kind: CellKind::Empty,
            position,
            adjacent_mines: 0,
            flagged: false,
            exploded: false,
            revealed: false,
        }
    }

    pub(crate) const fn mine(position: Coord2) -> Self {
        Self {
            kind: CellKind::Mine,
            ..Self::empty(position)
        }
    }

    /// Safe cell with its neighbourhood mine count, a zero count stays `Empty`.
    pub(crate) const fn safe(position: Coord2, adjacent_mines: u8) -> Self {
        Self {
            kind: if adjacent_mines == 0 {
                CellKind::Empty
            } else {
                CellKind::Number
            },
            adjacent_mines,
            ..Self::empty(position)
        }
    }

    /// The value handed out for coordinates outside the grid.
    pub const fn invalid(position: Coord2) -> Self {
        Self {
            kind: CellKind::Invalid,
            ..Self::empty(position)
        }
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    /// Mines in the 8-neighbourhood, only meaningful for `Number` cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_valid(&self) -> bool {
        !matches!(self.kind, CellKind::Invalid)
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn explode(&mut self) {
        self.exploded = true;
        self.revealed = true;
    }

    /// Picks what a renderer should draw for this cell.
    pub const fn tile(&self) -> Tile {
        use CellKind::*;

        if !self.revealed {
            return if self.flagged {
                Tile::Flag
            } else {
                Tile::Unknown
            };
        }

        match self.kind {
            Mine if self.exploded => Tile::Exploded,
            Mine => Tile::Mine,
            Number => Tile::Number(self.adjacent_mines),
            Empty | Invalid => Tile::Empty,
        }
    }
}

/// Player-visible appearance of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Unknown,
    Flag,
    Empty,
    Number(u8),
    Mine,
    Exploded,
}

impl Tile {
    /// whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Unknown | Self::Flag)
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Unknown => '#',
            Self::Flag => 'F',
            Self::Empty => '.',
            Self::Number(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
            Self::Mine => '*',
            Self::Exploded => 'X',
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Unknown
    }
}
