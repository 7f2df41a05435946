use std::task::Poll;

use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Coord, Player};
use crate::error::{PlacementError, SessionError};
use crate::outcome::{status, GameOutcome};
use crate::player::MoveSource;

/// Where the round stands.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    AwaitingMove(Player),
    /// Between a successful placement and the outcome check. Never observable
    /// from outside a call to [`GameSession::submit`].
    Evaluating,
    RoundOver(GameOutcome),
}

/// Result of handing a move to the session.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Turn {
    /// Cell was taken, the same player moves again.
    Retry,
    /// Mark placed, now it is this player's turn.
    NextTurn(Player),
    Concluded(GameOutcome),
}

/// Round results across resets.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Scoreboard {
    pub circle_wins: u32,
    pub cross_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::One) => self.circle_wins += 1,
            GameOutcome::Win(Player::Two) => self.cross_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => {}
        }
    }

    pub fn rounds(&self) -> u32 {
        self.circle_wins + self.cross_wins + self.draws
    }
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub outcome: GameOutcome,
    pub active: Player,
    pub phase: Phase,
    pub message: String,
}

/// Two move sources taking turns on one board. Player one opens every round.
pub struct GameSession {
    board: Board,
    active: Player,
    phase: Phase,
    sources: [Box<dyn MoveSource>; 2],
    score: Scoreboard,
}

impl GameSession {
    pub fn new(size: usize, player_one: Box<dyn MoveSource>, player_two: Box<dyn MoveSource>) -> Self {
        Self {
            board: Board::new(size),
            active: Player::One,
            phase: Phase::AwaitingMove(Player::One),
            sources: [player_one, player_two],
            score: Scoreboard::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Always computed from the board.
    pub fn outcome(&self) -> GameOutcome {
        status(&self.board)
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.score
    }

    pub fn rounds_played(&self) -> u32 {
        self.score.rounds()
    }

    pub fn source(&self, player: Player) -> &dyn MoveSource {
        self.sources[seat(player)].as_ref()
    }

    /// Asks the active source for a move once. `None` while the source is
    /// still thinking or the round is over.
    pub fn poll_turn(&mut self) -> Result<Option<Turn>, SessionError> {
        let Phase::AwaitingMove(player) = self.phase else {
            return Ok(None);
        };

        match self.sources[seat(player)].propose_move(&self.board, player) {
            Poll::Ready(at) => self.submit(at).map(Some),
            Poll::Pending => Ok(None),
        }
    }

    /// Plays `at` for the active player.
    #[instrument(level = "debug", skip(self), fields(player = ?self.active))]
    pub fn submit(&mut self, at: Coord) -> Result<Turn, SessionError> {
        let Phase::AwaitingMove(player) = self.phase else {
            return Err(SessionError::RoundOver);
        };

        match self.board.place(at.row, at.col, player) {
            Ok(()) => {}
            Err(PlacementError::Occupied { .. }) => {
                debug!(%at, "cell taken, same player again");
                return Ok(Turn::Retry);
            }
            Err(err) => {
                warn!(%err, source = self.sources[seat(player)].name(), "move source broke contract");
                return Err(err.into());
            }
        }
        self.phase = Phase::Evaluating;

        let outcome = status(&self.board);
        if outcome.is_terminal() {
            info!(%outcome, "round over");
            self.score.record(outcome);
            self.phase = Phase::RoundOver(outcome);
            return Ok(Turn::Concluded(outcome));
        }

        self.active = !player;
        self.phase = Phase::AwaitingMove(self.active);
        Ok(Turn::NextTurn(self.active))
    }

    /// Clears the board for a new round, circles to open.
    pub fn reset(&mut self) {
        debug!(rounds = self.score.rounds(), "new round");
        self.board.reset();
        self.active = Player::One;
        self.phase = Phase::AwaitingMove(Player::One);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            outcome: self.outcome(),
            active: self.active,
            phase: self.phase,
            message: self.message(),
        }
    }

    fn message(&self) -> String {
        match self.phase {
            Phase::AwaitingMove(player) => {
                format!("{player}'s turn ({})", self.sources[seat(player)].name())
            }
            Phase::Evaluating => String::from("..."),
            Phase::RoundOver(outcome) => outcome.to_string(),
        }
    }
}

fn seat(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}
