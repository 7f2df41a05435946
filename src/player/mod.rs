//! Move sources: anything that can choose a cell for the player to move.

mod computer;
mod human;

pub use computer::{RandomMoveSource, SearchMoveSource};
pub use human::{ChannelInput, HumanMoveSource, InputEvent, InputSource};

use std::task::Poll;

use crate::board::{Board, Coord, Player};

/// Produces moves for one seat.
///
/// `Poll::Pending` means no decision yet and the caller should ask again
/// later. A ready coordinate is only a proposal; the session validates it
/// against the board.
pub trait MoveSource {
    fn propose_move(&mut self, board: &Board, player: Player) -> Poll<Coord>;

    /// Display name for status text and logs.
    fn name(&self) -> &str;
}
