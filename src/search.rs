//! Exhaustive minimax over every legal continuation.
//!
//! Scores are always taken from the point of view of the player who started
//! the search: `+1` when they win, `-1` when the opponent wins and `0` for a
//! draw. Hypothetical marks are placed through [`Scratch`], which empties the
//! cell again when dropped, so the working board is back to its starting
//! state whenever a call returns.

use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument};

use crate::board::{Board, Cell, Coord, Player};
use crate::error::PlacementError;
use crate::outcome::{status, GameOutcome};

pub const WIN: i8 = 1;
pub const DRAW: i8 = 0;
pub const LOSS: i8 = -1;

/// Picks the move for `player` with the best minimax score.
///
/// Ties go to the first cell in row-major order, except that a move which
/// wins on the spot is always taken. Returns `None` if the board is already
/// decided.
#[instrument(level = "debug", skip(board), fields(marks = board.mark_count()))]
pub fn best_move(board: &Board, player: Player) -> Option<Coord> {
    if status(board).is_terminal() {
        return None;
    }

    let mut search = Minimax::new(player);
    let mut work = board.clone();
    let mut best: Option<(Coord, i8)> = None;

    for at in board.empty_cells() {
        let mut scratch = Scratch::place(&mut work, at, player).ok()?;
        if status(&scratch) == GameOutcome::Win(player) {
            debug!(%at, "taking immediate win");
            return Some(at);
        }

        let score = search.evaluate(&mut scratch, !player);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((at, score));
        }
    }

    if let Some((at, score)) = best {
        debug!(%at, score, nodes = search.nodes, "search finished");
    }
    best.map(|(at, _)| at)
}

/// Minimax value of `board` for `searching_player` with `to_move` about to
/// play.
pub fn score(board: &Board, searching_player: Player, to_move: Player) -> i8 {
    Minimax::new(searching_player).evaluate(&mut board.clone(), to_move)
}

struct Minimax {
    searcher: Player,
    nodes: u64,
}

impl Minimax {
    fn new(searcher: Player) -> Self {
        Self { searcher, nodes: 0 }
    }

    fn evaluate(&mut self, board: &mut Board, to_move: Player) -> i8 {
        self.nodes += 1;

        match status(board) {
            GameOutcome::Win(winner) if winner == self.searcher => return WIN,
            GameOutcome::Win(_) => return LOSS,
            GameOutcome::Draw => return DRAW,
            GameOutcome::InProgress => {}
        }

        let maximizing = to_move == self.searcher;
        let mut best = if maximizing { LOSS } else { WIN };
        let n = board.size();

        for row in 0..n {
            for col in 0..n {
                if board.cell_at(row, col) != Ok(Cell::Empty) {
                    continue;
                }
                let Ok(mut scratch) = Scratch::place(board, Coord::new(row, col), to_move) else {
                    continue;
                };
                let score = self.evaluate(&mut scratch, !to_move);
                best = if maximizing {
                    best.max(score)
                } else {
                    best.min(score)
                };
            }
        }

        best
    }
}

/// A board with one hypothetical mark on it. Dropping the guard removes the
/// mark.
struct Scratch<'a> {
    board: &'a mut Board,
    at: Coord,
}

impl<'a> Scratch<'a> {
    fn place(board: &'a mut Board, at: Coord, player: Player) -> Result<Self, PlacementError> {
        board.place(at.row, at.col, player)?;
        Ok(Self { board, at })
    }
}

impl Deref for Scratch<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        // `at` was placed successfully, so it is on the board
        let _ = self.board.clear(self.at.row, self.at.col);
    }
}
