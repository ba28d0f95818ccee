mod game_loop;
mod intent;

pub use game_loop::GameLoop;
pub use intent::{Intent, UnknownIntent};
