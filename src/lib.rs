//! Tic-tac-toe engine: board model, win detection, minimax opponent and a
//! turn state machine that alternates two move sources.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod player;
pub mod search;
pub mod session;

pub use board::{Board, Cell, Coord, Player};
pub use config::{Config, Opponent};
pub use driver::{Renderer, Timing};
pub use error::{ConfigError, ParseError, PlacementError, SessionError};
pub use outcome::{status, GameOutcome};
pub use session::{GameSession, Phase, Scoreboard, Snapshot, Turn};
