use std::path::PathBuf;

use clap::Parser;
use tictactoe_engine::{Config, Opponent};

/// Tic-tac-toe against a person or the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(version)]
pub struct Cli {
    /// RON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays circles (moves first)
    #[arg(long, value_enum)]
    pub player_one: Option<Opponent>,

    /// Who plays crosses
    #[arg(long, value_enum)]
    pub player_two: Option<Opponent>,

    /// Board side length
    #[arg(long)]
    pub size: Option<usize>,

    /// Pause after each turn and each round, in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Seed for random opponents
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the effective config and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// File settings (or defaults) with command-line overrides applied.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(player) = self.player_one {
            config.player_one = player;
        }
        if let Some(player) = self.player_two {
            config.player_two = player;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(ms) = self.pause_ms {
            config.turn_pause_ms = ms;
            config.round_pause_ms = ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}
