use std::{cell::RefCell, rc::Rc, task::Poll};

use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, warn};

use super::MoveSource;
use crate::board::{Board, Cell, Coord, Player};

/// What a human move source needs from the input device.
pub trait InputSource {
    /// Cell currently under the cursor.
    fn selection(&mut self) -> Coord;

    /// Consumes one pending confirm, if there is one.
    fn take_confirm(&mut self) -> bool;
}

// Hot-seat games hand the same device to both seats.
impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn selection(&mut self) -> Coord {
        self.borrow_mut().selection()
    }

    fn take_confirm(&mut self) -> bool {
        self.borrow_mut().take_confirm()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Select(Coord),
    Confirm,
}

/// Input device fed through a channel, one event at a time.
#[derive(Debug)]
pub struct ChannelInput {
    rx: mpsc::UnboundedReceiver<InputEvent>,
    size: usize,
    cursor: Coord,
    closed: bool,
}

impl ChannelInput {
    pub fn new(size: usize) -> (mpsc::UnboundedSender<InputEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let input = Self {
            rx,
            size,
            cursor: Coord::default(),
            closed: false,
        };
        (tx, input)
    }

    fn clamp(&self, at: Coord) -> Coord {
        let last = self.size.saturating_sub(1);
        Coord::new(at.row.min(last), at.col.min(last))
    }
}

impl InputSource for ChannelInput {
    fn selection(&mut self) -> Coord {
        self.cursor
    }

    // Events are applied in order up to the first confirm so that a confirm
    // always refers to the selection made before it.
    fn take_confirm(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(InputEvent::Select(at)) => self.cursor = self.clamp(at),
                Ok(InputEvent::Confirm) => return true,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        warn!("input channel closed");
                        self.closed = true;
                    }
                    return false;
                }
            }
        }
    }
}

/// A person at the keyboard.
pub struct HumanMoveSource<I> {
    name: String,
    input: I,
}

impl<I: InputSource> HumanMoveSource<I> {
    pub fn new(name: impl Into<String>, input: I) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

impl<I: InputSource> MoveSource for HumanMoveSource<I> {
    fn propose_move(&mut self, board: &Board, player: Player) -> Poll<Coord> {
        if !self.input.take_confirm() {
            return Poll::Pending;
        }

        let at = self.input.selection();
        match board.cell_at(at.row, at.col) {
            Ok(Cell::Empty) => Poll::Ready(at),
            _ => {
                debug!(%player, %at, "confirm on unavailable cell ignored");
                Poll::Pending
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_without_confirm() {
        let (tx, input) = ChannelInput::new(3);
        let mut human = HumanMoveSource::new("you", input);
        tx.send(InputEvent::Select(Coord::new(1, 1))).unwrap();

        assert_eq!(human.propose_move(&Board::default(), Player::One), Poll::Pending);
    }

    #[test]
    fn test_confirm_uses_preceding_selection() {
        let (tx, input) = ChannelInput::new(3);
        let mut human = HumanMoveSource::new("you", input);
        tx.send(InputEvent::Select(Coord::new(1, 1))).unwrap();
        tx.send(InputEvent::Confirm).unwrap();
        tx.send(InputEvent::Select(Coord::new(2, 2))).unwrap();

        let board = Board::default();
        assert_eq!(human.propose_move(&board, Player::One), Poll::Ready(Coord::new(1, 1)));
        assert_eq!(human.propose_move(&board, Player::One), Poll::Pending);
    }

    #[test]
    fn test_confirm_on_occupied_cell_is_swallowed() {
        let (tx, input) = ChannelInput::new(3);
        let mut human = HumanMoveSource::new("you", input);
        let board: Board = "O__/___/___".parse().unwrap();

        tx.send(InputEvent::Select(Coord::new(0, 0))).unwrap();
        tx.send(InputEvent::Confirm).unwrap();
        assert_eq!(human.propose_move(&board, Player::Two), Poll::Pending);

        tx.send(InputEvent::Select(Coord::new(0, 1))).unwrap();
        tx.send(InputEvent::Confirm).unwrap();
        assert_eq!(human.propose_move(&board, Player::Two), Poll::Ready(Coord::new(0, 1)));
    }

    #[test]
    fn test_selection_is_clamped() {
        let (tx, mut input) = ChannelInput::new(3);
        tx.send(InputEvent::Select(Coord::new(7, 1))).unwrap();
        assert!(!input.take_confirm());
        assert_eq!(input.selection(), Coord::new(2, 1));
    }

    #[test]
    fn test_closed_channel_stays_pending() {
        let (tx, input) = ChannelInput::new(3);
        drop(tx);
        let mut human = HumanMoveSource::new("you", input);
        assert_eq!(human.propose_move(&Board::default(), Player::One), Poll::Pending);
        assert_eq!(human.propose_move(&Board::default(), Player::One), Poll::Pending);
    }

    #[test]
    fn test_shared_input_between_seats() {
        let (tx, input) = ChannelInput::new(3);
        let shared = Rc::new(RefCell::new(input));
        let mut one = HumanMoveSource::new("left", Rc::clone(&shared));
        let mut two = HumanMoveSource::new("right", shared);

        tx.send(InputEvent::Select(Coord::new(0, 0))).unwrap();
        tx.send(InputEvent::Confirm).unwrap();
        tx.send(InputEvent::Select(Coord::new(2, 2))).unwrap();
        tx.send(InputEvent::Confirm).unwrap();

        let board = Board::default();
        assert_eq!(one.propose_move(&board, Player::One), Poll::Ready(Coord::new(0, 0)));
        assert_eq!(two.propose_move(&board, Player::Two), Poll::Ready(Coord::new(2, 2)));
    }
}
