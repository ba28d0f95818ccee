pub mod models;
pub mod types;
pub mod utils;

pub use models::{GameConfig, GameState, GameStatus};
pub use types::{Coord, Direction};
