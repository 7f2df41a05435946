use std::task::Poll;

use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use tracing::debug;

use super::MoveSource;
use crate::board::{Board, Coord, Player};
use crate::search::best_move;

/// Optimal opponent backed by a full minimax search.
pub struct SearchMoveSource {
    name: String,
}

impl SearchMoveSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MoveSource for SearchMoveSource {
    fn propose_move(&mut self, board: &Board, player: Player) -> Poll<Coord> {
        match best_move(board, player) {
            Some(at) => {
                debug!(ai = %self.name, %at, "search chose cell");
                Poll::Ready(at)
            }
            None => Poll::Pending,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plays any empty cell, uniformly at random.
pub struct RandomMoveSource {
    name: String,
    rng: StdRng,
}

impl RandomMoveSource {
    /// A fixed `seed` makes the sequence of choices reproducible.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl MoveSource for RandomMoveSource {
    fn propose_move(&mut self, board: &Board, _player: Player) -> Poll<Coord> {
        match board.empty_cells().choose(&mut self.rng) {
            Some(at) => {
                debug!(ai = %self.name, %at, "random pick");
                Poll::Ready(at)
            }
            None => Poll::Pending,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
