use std::fmt;

use serde::{Deserialize, Serialize};

/// Totals across the runs of one session. Hosts record each finished run;
/// the engine never touches this.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: u64,
    pub total_score:  u64,
    pub best_game:    u32,
}

impl SessionStats {
    /// Records a finished run. Returns true if it beat every earlier run.
    pub fn record(&mut self, score: u32) -> bool {
        let is_best = self.games_played == 0 || score > self.best_game;
        self.games_played += 1;
        self.total_score += u64::from(score);
        self.best_game = self.best_game.max(score);
        is_best
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} games, best {}, average {:.1}",
            self.games_played,
            self.best_game,
            self.average_score()
        )
    }
}
