use std::{fmt, str::FromStr};

use crate::grid::types::Direction;

/// What a host can ask of a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Turn, starting the game first if it is still READY.
    Steer(Direction),
    Start,
    Pause,
    Resume,
    Restart,
    /// Pause while playing, resume while paused.
    TogglePause,
    /// Start while READY, restart after GAME_OVER.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIntent(pub String);

impl fmt::Display for UnknownIntent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown command {:?}", self.0)
    }
}

impl std::error::Error for UnknownIntent {}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Self::Steer(Direction::Up),
            "s" | "down" => Self::Steer(Direction::Down),
            "a" | "left" => Self::Steer(Direction::Left),
            "d" | "right" => Self::Steer(Direction::Right),
            "start" => Self::Start,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "r" | "restart" => Self::Restart,
            "p" | "space" => Self::TogglePause,
            "" | "go" | "enter" => Self::Confirm,
            other => return Err(UnknownIntent(other.to_owned())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, UnknownIntent};
    use crate::grid::types::Direction;

    #[test]
    fn parses_keys_and_words() {
        assert_eq!("w".parse(), Ok(Intent::Steer(Direction::Up)));
        assert_eq!(" Left \n".parse(), Ok(Intent::Steer(Direction::Left)));
        assert_eq!("p".parse(), Ok(Intent::TogglePause));
        assert_eq!("".parse(), Ok(Intent::Confirm));
        assert_eq!("restart".parse(), Ok(Intent::Restart));
    }

    #[test]
    fn rejects_nonsense() {
        assert_eq!(
            "jump".parse::<Intent>(),
            Err(UnknownIntent("jump".to_owned()))
        );
    }
}
