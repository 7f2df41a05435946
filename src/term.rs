//! Terminal glue: prints the board and turns typed cells into input events.

use tictactoe_engine::{
    driver::Renderer,
    player::InputEvent,
    session::{Phase, Snapshot},
    Coord,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        println!("\n{}\n", snapshot.board);
        match snapshot.phase {
            Phase::AwaitingMove(_) => println!("{}", snapshot.message),
            _ => println!("{}\n", snapshot.message),
        }
    }
}

/// Reads cells like `b2` from stdin until EOF or `q`.
pub async fn read_moves(tx: UnboundedSender<InputEvent>, size: usize) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "q" | "quit" | "exit") {
            break;
        }

        let tile: Coord = match line.parse() {
            Ok(tile) => tile,
            Err(err) => {
                debug!(%err, "bad input");
                println!("Invalid input! Try again.");
                continue;
            }
        };
        if tile.row >= size || tile.col >= size {
            println!("Invalid tile! Off the board. Try again.");
            continue;
        }

        // the game loop is gone once the receiver drops
        if tx.send(InputEvent::Select(tile)).is_err() || tx.send(InputEvent::Confirm).is_err() {
            break;
        }
    }

    Ok(())
}
