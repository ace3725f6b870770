use crate::*;
pub use random::*;

mod random;

/// Receives a config that has already been clamped to the board.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Hands back a prepared layout unchanged, the config is ignored.
impl MineGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> MineLayout {
        if self.game_config() != config {
            log::debug!(
                "Fixed layout {:?} used in place of requested {:?}",
                self.game_config(),
                config
            );
        }
        self
    }
}
