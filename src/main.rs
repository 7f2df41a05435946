mod cli;
mod term;

use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use clap::Parser;
use tictactoe_engine::{
    driver,
    player::{ChannelInput, HumanMoveSource, MoveSource, RandomMoveSource, SearchMoveSource},
    Config, GameSession, Opponent, Player,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::term::TerminalRenderer;

// One thread: turns never overlap and the board has a single writer.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so they do not tear up the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config()?;
    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let size = config.board_size;
    if size > 3 && [config.player_one, config.player_two].contains(&Opponent::Search) {
        warn!(size, "exhaustive search on a board this large may not finish");
    }

    let (tx, input) = ChannelInput::new(size);
    let input = Rc::new(RefCell::new(input));
    let mut session = GameSession::new(
        size,
        seat(config.player_one, Player::One, &input, &config),
        seat(config.player_two, Player::Two, &input, &config),
    );

    let has_human = [config.player_one, config.player_two].contains(&Opponent::Human);
    let reader = async move {
        if !has_human {
            drop(tx);
            return std::future::pending().await;
        }
        if let Err(err) = term::read_moves(tx, size).await {
            warn!(%err, "stopped reading input");
        }
    };
    let shutdown = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = reader => {}
        }
    };

    info!(
        player_one = ?config.player_one,
        player_two = ?config.player_two,
        size,
        "starting game"
    );
    if has_human {
        println!("Enter a cell like b2 (column letter, row number), or q to quit.");
    }

    driver::run(&mut session, &mut TerminalRenderer, config.timing(), shutdown).await?;

    let score = session.scoreboard();
    info!(
        rounds = score.rounds(),
        circle_wins = score.circle_wins,
        cross_wins = score.cross_wins,
        draws = score.draws,
        "game over"
    );
    Ok(())
}

fn seat(
    kind: Opponent,
    player: Player,
    input: &Rc<RefCell<ChannelInput>>,
    config: &Config,
) -> Box<dyn MoveSource> {
    match kind {
        Opponent::Human => Box::new(HumanMoveSource::new("you", Rc::clone(input))),
        Opponent::Search => Box::new(SearchMoveSource::new("computer")),
        Opponent::Random => {
            // distinct streams when both seats are random
            let seed = config.seed.map(|s| s.wrapping_add(player as u64));
            Box::new(RandomMoveSource::new("random", seed))
        }
    }
}
