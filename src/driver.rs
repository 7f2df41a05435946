//! The endless round loop around a [`GameSession`].

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::session::{GameSession, Snapshot, Turn};

/// Something that can show the game. Called after every placement, every
/// finished round and every reset.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause after each placement that does not end the round.
    pub turn_pause: Duration,
    /// Pause between the end of a round and the reset.
    pub round_pause: Duration,
    /// How often a pending move source is polled again.
    pub tick: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            turn_pause: Duration::from_secs(1),
            round_pause: Duration::from_secs(1),
            tick: Duration::from_millis(16),
        }
    }
}

/// Plays rounds until `shutdown` completes.
///
/// Returns an error only when a move source proposes a cell off the board.
pub async fn run<R, F>(
    session: &mut GameSession,
    renderer: &mut R,
    timing: Timing,
    shutdown: F,
) -> Result<(), SessionError>
where
    R: Renderer,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = shutdown => {
            info!("shutdown requested");
            Ok(())
        }
        res = play(session, renderer, timing) => res,
    }
}

async fn play<R: Renderer>(
    session: &mut GameSession,
    renderer: &mut R,
    timing: Timing,
) -> Result<(), SessionError> {
    // interval() panics on a zero period
    let mut ticker = time::interval(timing.tick.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    renderer.render(&session.snapshot());

    loop {
        match session.poll_turn()? {
            None => {
                ticker.tick().await;
            }
            Some(Turn::Retry) => {
                debug!(player = %session.active_player(), "move rejected, asking again");
                ticker.tick().await;
            }
            Some(Turn::NextTurn(_)) => {
                renderer.render(&session.snapshot());
                pause(timing.turn_pause).await;
            }
            Some(Turn::Concluded(outcome)) => {
                renderer.render(&session.snapshot());
                debug!(%outcome, "waiting before next round");
                pause(timing.round_pause).await;
                session.reset();
                renderer.render(&session.snapshot());
            }
        }
    }
}

// Zero pauses still yield so shutdown gets a chance to run between turns.
async fn pause(duration: Duration) {
    if duration.is_zero() {
        tokio::task::yield_now().await;
    } else {
        time::sleep(duration).await;
    }
}
