pub mod greedy;

pub use greedy::Greedy;

use crate::grid::{types::Direction, GameConfig, GameState};

/// Something other than a human at the controls.
pub trait Pilot {
    /// The turn to request before the next tick, or `None` when every option
    /// is fatal and it makes no difference.
    fn get_movement(
        &self,
        state: &GameState,
        config: &GameConfig,
    ) -> Option<Direction>;
}
