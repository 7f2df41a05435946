//! Error types for board placement, session turns and configuration.

use thiserror::Error;

/// Why a mark could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Coordinates outside the grid. A move source producing these is broken.
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },

    /// The target cell already holds a mark.
    #[error("({row}, {col}) is already marked")]
    Occupied { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid placement: {0}")]
    Placement(#[from] PlacementError),

    #[error("round is over, waiting for reset")]
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid coordinate {0:?}, expected e.g. \"b2\" or \"1,1\"")]
    Coord(String),

    #[error("row {row} does not have {expected} cells")]
    RowLength { row: usize, expected: usize },

    #[error("unknown cell symbol {0:?}")]
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1, got {0}")]
    BoardSize(usize),

    #[error("board size {size} is larger than the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },
}
