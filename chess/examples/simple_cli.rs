// Simple command-line application to play chess
//
// Enter moves as two squares, like `e2 e4` or `e2e4`. Set `RUST_LOG=debug` to see why moves
// are rejected.

use gridchess::{attack, board::PrettyStyle, movegen, Board, Side, Square};
use std::io::{self, BufRead, Write};

fn parse_move(s: &str) -> Option<(Square, Square)> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.len() != 4 || !s.is_ascii() {
        return None;
    }
    let src = s[..2].parse().ok()?;
    let dst = s[2..].parse().ok()?;
    Some((src, dst))
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut stdin = io::stdin().lock();
    let mut board = Board::initial();

    loop {
        println!("{}", board.pretty(PrettyStyle::Ascii));
        let side = match board.side() {
            Side::White => "White",
            Side::Black => "Black",
        };

        if movegen::gen_legal(&board).is_empty() {
            if attack::in_check(&board, board.side()) {
                println!("{} is checkmated", side);
            } else {
                println!("{} has no moves", side);
            }
            break;
        }

        print!("{} move: ", side);
        io::stdout().flush()?;
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }

        let (src, dst) = match parse_move(s.trim()) {
            Some(mv) => mv,
            None => {
                println!("Cannot parse move {:?}", s.trim());
                println!();
                continue;
            }
        };

        if let Err(e) = board.attempt_move(src, dst) {
            println!("Bad move: {}", e);
        } else if board.is_check() {
            println!("Check!");
        }
        println!();
    }

    tracing::info!("game over");
    Ok(())
}
