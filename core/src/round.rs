use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Only a new round leaves a terminal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

impl RoundState {
    /// Indicates the round has ended and no moves can be made anymore
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One play-through from a fresh grid to a win or a loss. Player commands go through here so
/// nothing touches the grid once the round is over.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    config: GameConfig,
    grid: Grid,
    state: RoundState,
}

impl Round {
    pub fn new(config: GameConfig, generator: impl MineGenerator) -> Self {
        let grid = Grid::new_game(config, generator);
        let config = GameConfig::new_unchecked(grid.size(), grid.mine_count());
        log::debug!("New round {:?}", config);
        Self {
            config,
            grid,
            state: Default::default(),
        }
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomMineGenerator::new(seed))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        Self::new(layout.game_config(), layout)
    }

    /// Throws the current round away and starts another one.
    pub fn new_game(&mut self, config: GameConfig, generator: impl MineGenerator) {
        *self = Self::new(config, generator);
    }

    /// Starts another round with the same configuration.
    pub fn restart(&mut self, generator: impl MineGenerator) {
        self.new_game(self.config, generator);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.grid.cell(coords)
    }

    /// Reveals a cell and settles the round when that decides it.
    pub fn reveal(&mut self, coords: Coord2) -> RoundState {
        if self.is_over() {
            return self.state;
        }

        match self.grid.reveal(coords) {
            RevealOutcome::Unchanged => {}
            RevealOutcome::Loss => self.finish(GameOutcome::Lost),
            RevealOutcome::Revealed => {
                if self.grid.check_win() {
                    self.finish(GameOutcome::Won);
                }
            }
        }

        self.state
    }

    /// Toggles a flag, returns whether the cell is flagged afterwards.
    pub fn flag(&mut self, coords: Coord2) -> bool {
        if self.is_over() {
            return self.grid.cell(coords).is_flagged();
        }

        self.grid.flag(coords)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.grid.end_game(outcome);
        self.state = match outcome {
            GameOutcome::Won => RoundState::Won,
            GameOutcome::Lost => RoundState::Lost,
        };
        log::debug!("Round ended: {:?}", self.state);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_round(self)
    }

    /// Pushes the current snapshot to the presentation layer.
    pub fn present(&self, presenter: &mut impl Presenter) {
        presenter.draw(&self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_mine_round() -> Round {
        Round::from_layout(MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap())
    }

    #[test]
    fn far_corner_flood_wins_immediately() {
        let mut round = corner_mine_round();

        assert_eq!(round.reveal((2, 2)), RoundState::Won);

        assert!(round.is_over());
        let mine = round.cell((0, 0));
        assert!(!mine.is_revealed());
        assert!(mine.is_flagged());
        for cell in round.grid().iter().filter(|cell| !cell.is_mine()) {
            assert!(cell.is_revealed());
        }
    }

    #[test]
    fn revealing_the_mine_loses() {
        let mut round = corner_mine_round();

        assert_eq!(round.reveal((0, 0)), RoundState::Lost);

        let exploded: usize = round.grid().iter().filter(|cell| cell.is_exploded()).count();
        assert_eq!(exploded, 1);
        assert!(round.cell((0, 0)).is_exploded());
        assert!(round.cell((0, 0)).is_revealed());
    }

    #[test]
    fn loss_discloses_every_mine() {
        let layout = MineLayout::from_mine_coords((4, 4), &[(0, 0), (3, 3), (1, 3)]).unwrap();
        let mut round = Round::from_layout(layout);

        round.reveal((3, 3));

        for cell in round.grid().iter().filter(|cell| cell.is_mine()) {
            assert!(cell.is_revealed());
        }
        assert_eq!(round.cell((0, 0)).tile(), Tile::Mine);
        assert_eq!(round.cell((3, 3)).tile(), Tile::Exploded);
    }

    #[test]
    fn gameover_blocks_reveal_and_flag() {
        let mut round = corner_mine_round();
        round.reveal((0, 0));
        let before = round.clone();

        assert_eq!(round.reveal((2, 2)), RoundState::Lost);
        assert!(!round.flag((1, 1)));

        assert_eq!(round, before);
    }

    #[test]
    fn number_reveal_keeps_round_going() {
        let mut round = corner_mine_round();

        assert_eq!(round.reveal((1, 1)), RoundState::InProgress);
        assert!(!round.is_over());
    }

    #[test]
    fn flag_blocks_reveal_until_removed() {
        let mut round = corner_mine_round();

        assert!(round.flag((0, 0)));
        assert_eq!(round.reveal((0, 0)), RoundState::InProgress);
        assert!(!round.flag((0, 0)));
        assert_eq!(round.reveal((0, 0)), RoundState::Lost);
    }

    #[test]
    fn restart_clears_gameover() {
        let mut round = Round::with_seed(GameConfig::new((5, 5), 5), 11);
        let mine = round.grid().iter().find(|cell| cell.is_mine()).map(Cell::position);
        assert_eq!(round.reveal(mine.unwrap()), RoundState::Lost);

        round.restart(RandomMineGenerator::new(12));

        assert_eq!(round.state(), RoundState::InProgress);
        assert_eq!(round.config(), GameConfig::new((5, 5), 5));
        assert!(round.grid().iter().all(|cell| !cell.is_revealed()));
        assert_eq!(round.grid().mine_count(), 5);
    }

    #[test]
    fn new_game_clamps_configuration() {
        let mut round = corner_mine_round();

        round.new_game(GameConfig::new_unchecked((2, 2), 50), RandomMineGenerator::new(0));

        assert_eq!(round.config().mines, 4);
        assert_eq!(round.grid().size(), (2, 2));
    }
}
