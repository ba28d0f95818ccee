use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall { width: i64, height: i64 },
    NonPositive(&'static str),
    SpeedFloorAboveInitial { initial_speed: u64, max_speed: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BoardTooSmall { width, height } => write!(
                f,
                "board must be at least 3x3 to be playable, got {width}x{height}"
            ),
            Self::NonPositive(field) => {
                write!(f, "{field} must be greater than zero")
            }
            Self::SpeedFloorAboveInitial {
                initial_speed,
                max_speed,
            } => write!(
                f,
                "max_speed ({max_speed} ms) cannot be slower than \
                 initial_speed ({initial_speed} ms)"
            ),
        }
    }
}

impl Error for ConfigError {}
