//! Win and draw detection.

use std::fmt::Display;

use tracing::trace;

use crate::board::{Board, Cell, Coord, Player};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

impl Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Win(player) => write!(f, "{player} wins!"),
            GameOutcome::Draw => write!(f, "Draw."),
        }
    }
}

/// Evaluates `board` from scratch.
///
/// Lines are scanned rows first (top to bottom), then columns (left to
/// right), then the main diagonal and the anti-diagonal. The first line
/// filled with a single mark decides the winner. A full board with no such
/// line is a draw.
pub fn status(board: &Board) -> GameOutcome {
    let n = board.size();
    if n == 0 {
        return GameOutcome::Draw;
    }

    let rows = (0..n).map(|r| line_owner(board, (0..n).map(move |c| (r, c))));
    let cols = (0..n).map(|c| line_owner(board, (0..n).map(move |r| (r, c))));
    let diag = line_owner(board, (0..n).map(|i| (i, i)));
    let anti = line_owner(board, (0..n).map(|i| (i, n - 1 - i)));

    if let Some(player) = rows
        .chain(cols)
        .chain([diag, anti])
        .find_map(|owner| owner)
    {
        trace!(%player, "line completed");
        return GameOutcome::Win(player);
    }

    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

/// The player owning every cell of the line, if any.
fn line_owner(board: &Board, mut line: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
    let first = at(board, line.next()?);
    let owner = first.owner()?;
    line.all(|pos| at(board, pos) == first).then_some(owner)
}

// only called with coordinates inside 0..size
fn at(board: &Board, (row, col): (usize, usize)) -> Cell {
    board[Coord::new(row, col)]
}
