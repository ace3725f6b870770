use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Cell records for one round. Mines and numbers are fixed at construction, only the
/// player markers change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Clamps `config`, generates the mines for it and derives every cell from them.
    pub fn new_game(config: GameConfig, generator: impl MineGenerator) -> Self {
        let config = GameConfig::new(config.size, config.mines);
        Self::from_layout(&generator.generate(config))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if layout[coords] {
                Cell::mine(coords)
            } else {
                Cell::safe(coords, layout.adjacent_mine_count(coords))
            }
        });

        log::debug!(
            "New grid {:?} with {} mines",
            layout.size(),
            layout.mine_count()
        );

        Self {
            cells,
            mine_count: layout.mine_count(),
        }
    }

    pub fn size(&self) -> Coord2 {
        // same dimensions as the layout it was built from
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    /// The cell at `coords`, or the `Invalid` sentinel when off-grid.
    pub fn cell(&self, coords: Coord2) -> Cell {
        self.try_cell(coords).unwrap_or_else(|_| Cell::invalid(coords))
    }

    pub fn try_cell(&self, coords: Coord2) -> Result<Cell> {
        if self.contains(coords) {
            Ok(self.cells[coords.to_nd_index()])
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// All cells, column by column.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flag_count())
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cell(coords);

        if !cell.is_valid() || cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::Unchanged;
        }

        match cell.kind() {
            CellKind::Mine => {
                if let Some(cell) = self.cell_mut(coords) {
                    cell.explode();
                }
                log::debug!("Mine hit at {:?}", coords);
                RevealOutcome::Loss
            }
            CellKind::Number => {
                if let Some(cell) = self.cell_mut(coords) {
                    cell.reveal();
                }
                log::debug!("Revealed number at {:?}", coords);
                RevealOutcome::Revealed
            }
            CellKind::Empty => {
                let opened = self.flood_reveal(coords);
                log::debug!("Flood from {:?} opened {} cells", coords, opened);
                RevealOutcome::Revealed
            }
            CellKind::Invalid => RevealOutcome::Unchanged,
        }
    }

    /// Opens the orthogonally connected empty region around `start` plus the numbers that
    /// border it. Returns how many cells were opened.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut queued = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let visit = self.cell(visit_coords);

            // skip flagged or already opened cells
            if visit.is_revealed() || visit.is_flagged() {
                continue;
            }

            // mines and the off-grid sentinel stop the branch
            if !visit.kind().is_floodable() {
                continue;
            }

            if let Some(cell) = self.cell_mut(visit_coords) {
                cell.reveal();
                opened += 1;
            }
            log::trace!("Flood opened cell at {:?}", visit_coords);

            // numbers are boundaries
            if visit.kind() == CellKind::Number {
                continue;
            }

            for delta in ORTHOGONAL {
                if let Some(next) = offset(visit_coords, delta)
                    && queued.insert(next)
                {
                    to_visit.push_back(next);
                }
            }
        }

        opened
    }

    /// Toggles the flag on a hidden cell and returns the cell's flag state afterwards.
    pub fn flag(&mut self, coords: Coord2) -> bool {
        let Some(cell) = self.cell_mut(coords) else {
            return false;
        };

        if cell.is_revealed() {
            return cell.is_flagged();
        }

        let flagged = !cell.is_flagged();
        cell.set_flagged(flagged);
        flagged
    }

    /// Won once every safe cell is open, mines need neither flag nor reveal.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_revealed() || cell.is_mine())
    }

    /// Loss discloses every mine, a win flags them all. Safe to call repeatedly.
    pub fn end_game(&mut self, outcome: GameOutcome) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            match outcome {
                GameOutcome::Lost => cell.reveal(),
                GameOutcome::Won => cell.set_flagged(true),
            }
        }
    }
}
