mod board;
mod error;
mod food;
pub mod rules;

use std::fmt;

pub use board::Board;
pub use error::ConfigError;
pub use food::place_food;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{
    types::Direction,
    GameConfig,
    GameState,
    GameStatus,
};

/// Owns the current `GameState` and the random source used for food.
///
/// Every operation swaps in a new state computed by `rules`; callers only
/// ever see shared borrows or clones.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    config: GameConfig,
    state:  GameState,
    rng:    R,
}

impl Engine<StdRng> {
    /// # Errors
    ///
    /// Fails if `config` does not describe a playable game.
    pub fn seeded(
        config: GameConfig,
        high_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(config, high_score, StdRng::seed_from_u64(seed))
    }

    /// # Errors
    ///
    /// Fails if `config` does not describe a playable game.
    pub fn from_os_rng(
        config: GameConfig,
        high_score: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(config, high_score, StdRng::from_os_rng())
    }
}

impl<R: Rng> Engine<R> {
    /// # Errors
    ///
    /// Fails if `config` does not describe a playable game.
    pub fn new(
        config: GameConfig,
        high_score: u32,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = rules::initial_state(&config, high_score, &mut rng);
        Ok(Self { config, state, rng })
    }

    /// Resumes from an existing snapshot, e.g. one handed back by a host.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not describe a playable game.
    pub fn with_state(
        config: GameConfig,
        state: GameState,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state, rng })
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn status(&self) -> GameStatus {
        self.state.status
    }

    /// READY -> PLAYING. Returns whether the status changed.
    pub fn start(&mut self) -> bool {
        self.transition(GameStatus::Ready, GameStatus::Playing)
    }

    /// PLAYING -> PAUSED. Returns whether the status changed.
    pub fn pause(&mut self) -> bool {
        self.transition(GameStatus::Playing, GameStatus::Paused)
    }

    /// PAUSED -> PLAYING. Returns whether the status changed.
    pub fn resume(&mut self) -> bool {
        self.transition(GameStatus::Paused, GameStatus::Playing)
    }

    /// Back to a fresh READY run. The best score seen so far is carried into
    /// the new state's `high_score`.
    pub fn restart(&mut self) {
        let high_score = self.state.high_score.max(self.state.score);
        info!("restarting, high score {high_score}");
        self.state =
            rules::initial_state(&self.config, high_score, &mut self.rng);
    }

    /// Queues `direction` for the next tick unless it reverses the last
    /// committed direction or the turn already queued. Rejected requests are
    /// dropped silently.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        let GameState {
            direction: committed,
            next_direction: pending,
            ..
        } = self.state;
        if direction.is_opposite(committed) || direction.is_opposite(pending) {
            debug!(
                "dropping {direction} (committed {committed}, pending \
                 {pending})"
            );
            return;
        }
        self.state.next_direction = direction;
    }

    /// Lets a persistence layer feed a stored best score in.
    pub fn set_high_score(&mut self, high_score: u32) {
        self.state.high_score = high_score;
    }

    pub fn advance(&mut self) -> &GameState {
        self.state = rules::advance(&self.state, &self.config, &mut self.rng);
        &self.state
    }

    fn transition(&mut self, from: GameStatus, to: GameStatus) -> bool {
        if self.state.status != from {
            debug!(
                "ignoring {from:?} -> {to:?} while {:?}",
                self.state.status
            );
            return false;
        }
        debug!("{from:?} -> {to:?}");
        self.state.status = to;
        true
    }
}

impl<R> fmt::Display for Engine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.state.render(&self.config))
    }
}
