use std::{fs, path::PathBuf};

use clap::Args;
use color_eyre::{eyre::WrapErr, Result};
use log::debug;

use crate::grid::GameConfig;

/// Board and speed flags shared by the binaries. Flags win over values read
/// from `--config`, which win over the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file holding a (possibly partial) game config
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<i64>,

    #[arg(long)]
    pub height: Option<i64>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    pub initial_speed: Option<u64>,

    /// Milliseconds shaved off the interval per score threshold
    #[arg(long)]
    pub speed_increment: Option<u64>,

    /// Shortest tick interval in milliseconds
    #[arg(long)]
    pub max_speed: Option<u64>,
}

impl ConfigArgs {
    /// # Errors
    ///
    /// Fails if the config file can't be read or parsed, or the result is
    /// not a playable game.
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path).wrap_err_with(|| {
                    format!("failed to read config {}", path.display())
                })?;
                serde_json::from_str(&raw).wrap_err_with(|| {
                    format!("failed to parse config {}", path.display())
                })?
            }
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(initial_speed) = self.initial_speed {
            config.initial_speed = initial_speed;
        }
        if let Some(speed_increment) = self.speed_increment {
            config.speed_increment = speed_increment;
        }
        if let Some(max_speed) = self.max_speed {
            config.max_speed = max_speed;
        }

        config.validate()?;
        debug!("resolved {config:?}");
        Ok(config)
    }
}
