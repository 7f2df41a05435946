//! Runtime settings, read from a RON file.
//!
//! ```ron
//! (
//!     board_size: 3,
//!     player_one: Human,
//!     player_two: Search,
//!     turn_pause_ms: 1000,
//!     round_pause_ms: 1000,
//!     seed: Some(7),
//! )
//! ```
//!
//! Missing fields take their defaults.

use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_SIZE, MAX_SIZE};
use crate::driver::Timing;
use crate::error::ConfigError;

/// Largest accepted side length.
pub const MAX_BOARD_SIZE: usize = MAX_SIZE;

/// Who sits in a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Opponent {
    Human,
    Search,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_size: usize,
    pub player_one: Opponent,
    pub player_two: Opponent,
    pub turn_pause_ms: u64,
    pub round_pause_ms: u64,
    pub tick_ms: u64,
    /// Seed for random opponents.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_SIZE,
            player_one: Opponent::Human,
            player_two: Opponent::Search,
            turn_pause_ms: 1000,
            round_pause_ms: 1000,
            tick_ms: 16,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> anyhow::Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            turn_pause: Duration::from_millis(self.turn_pause_ms),
            round_pause: Duration::from_millis(self.round_pause_ms),
            tick: Duration::from_millis(self.tick_ms),
        }
    }
}
