use ndarray::Array2;

use super::*;

/// Expects a config already clamped by [`GameConfig::new`].
///
/// Uniform coordinate sampling. A sample landing on a mine scans forward in row-major order
/// (x first, wrapping to the next row, then back to the top) to the next free cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

/// Next coordinate in scan order, wrapping at both ends of the board.
fn scan_forward((x, y): Coord2, (size_x, size_y): Coord2) -> Coord2 {
    if x + 1 < size_x {
        (x + 1, y)
    } else if y + 1 < size_y {
        (0, y + 1)
    } else {
        (0, 0)
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size;
        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Layout already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_checked_mask(Array2::from_elem(size.to_nd_index(), true));
        }

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for _ in 0..config.mines {
            let x: Coord = rng.random_range(0..size.0);
            let y: Coord = rng.random_range(0..size.1);
            let mut coords = (x, y);

            // terminates since at least one cell is still free
            while mines[coords.to_nd_index()] {
                coords = scan_forward(coords, size);
            }

            mines[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_checked_mask(mines);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
