#![no_std]

extern crate alloc;

use alloc::string::ToString;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use round::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod round;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the board to at least 1x1 and the mine count to what fits on it.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let clamped = mines.min(mult(size_x, size_y));
        if clamped != mines {
            log::warn!(
                "Requested {} mines but a {}x{} board only fits {}, clamped",
                mines,
                size_x,
                size_y,
                clamped
            );
        }
        Self::new_unchecked((size_x, size_y), clamped)
    }

    /// Like [`GameConfig::new`] but rejects instead of clamping.
    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON object such as `{"size": [9, 9], "mines": 10}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| GameError::MalformedConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (size_x, size_y) = self.size;
        if size_x < 1 || size_y < 1 || self.mines > self.total_cells() {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((16, 16), 32)
    }
}

/// Where the mines are, before any cell records exist. The mine count is always derived from
/// the mask, so there is no way to build one that disagrees with itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Rejects empty masks and masks wider or taller than [`Coord::MAX`].
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (dim_x, dim_y) = mine_mask.dim();
        let size_x: Coord = dim_x.try_into().map_err(|_| GameError::InvalidConfiguration)?;
        let size_y: Coord = dim_y.try_into().map_err(|_| GameError::InvalidConfiguration)?;
        if size_x < 1 || size_y < 1 {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::from_checked_mask(mine_mask))
    }

    /// Callers guarantee both axes are within `1..=Coord::MAX`.
    pub(crate) fn from_checked_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 < 1 || size.1 < 1 {
            return Err(GameError::InvalidConfiguration);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_checked_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        // both axes were checked to fit a Coord on construction
        let dim = self.mine_mask.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Off-grid coordinates never hold a mine.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    Revealed,
    Loss,
}

/// How a round ended, selects the sweep applied by [`Grid::end_game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_clamps_size_and_mines() {
        let config = GameConfig::new((0, -4), 5);

        assert_eq!(config.size, (1, 1));
        assert_eq!(config.mines, 1);
    }

    #[test]
    fn config_new_allows_zero_and_full_boards() {
        assert_eq!(GameConfig::new((3, 3), 0).mines, 0);
        assert_eq!(GameConfig::new((3, 3), 9).mines, 9);
    }

    #[test]
    fn try_new_rejects_too_many_mines() {
        assert_eq!(
            GameConfig::try_new((3, 3), 10),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::try_new((0, 3), 0),
            Err(GameError::InvalidConfiguration)
        );
        assert!(GameConfig::try_new((3, 3), 9).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::default(),
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::expert().total_cells(), 480);
    }

    #[test]
    fn from_json_parses_and_validates() {
        let config = GameConfig::from_json(r#"{"size": [9, 9], "mines": 10}"#).unwrap();
        assert_eq!(config, GameConfig::beginner());

        assert_eq!(
            GameConfig::from_json(r#"{"size": [2, 2], "mines": 5}"#),
            Err(GameError::InvalidConfiguration)
        );
        assert!(matches!(
            GameConfig::from_json("{\"size\": 9}"),
            Err(GameError::MalformedConfig(_))
        ));
    }

    #[test]
    fn layout_from_coords_counts_and_rejects_off_grid() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.size(), (3, 2));
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((-1, 0)));
        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
        assert_eq!(
            MineLayout::from_mine_coords((3, 2), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn layout_from_mask_derives_its_count() {
        let mut mask: Array2<bool> = Array2::default([2, 2]);
        mask[[1, 0]] = true;
        mask[[1, 1]] = true;

        let layout = MineLayout::from_mine_mask(mask).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.game_config(), GameConfig::new_unchecked((2, 2), 2));
    }

    #[test]
    fn layout_from_mask_rejects_sizes_coords_cannot_address() {
        let too_wide: Array2<bool> = Array2::default([Coord::MAX as usize + 1, 1]);
        let empty: Array2<bool> = Array2::default([0, 3]);

        assert_eq!(
            MineLayout::from_mine_mask(too_wide),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            MineLayout::from_mine_mask(empty),
            Err(GameError::InvalidConfiguration)
        );
    }
}
