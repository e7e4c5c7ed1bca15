// Simple command-line application to play chess
//
// Moves are accepted both in algebraic notation (`Nf3`) and in UCI format (`g1f3`).

use chessgrid::{board::PrettyStyle, clock, moves::Style, Color, MoveChain};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let mut stdin = io::stdin().lock();
    let mut chain = MoveChain::new_initial();

    loop {
        println!("{}", chain.board().pretty(PrettyStyle::Utf8));
        for c in [Color::White, Color::Black] {
            println!("{}: {}", c, clock::format_remaining(chain.clock().remaining(c)));
        }
        if chain.is_finished() {
            println!("Game finished, {} lost", chain.side());
            println!("{}", chain.san_list());
            return Ok(());
        }
        if chain.status().check {
            println!("Check!");
        }

        print!("{} to move: ", chain.side());
        io::stdout().flush()?;
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            println!();
            println!("{}", chain.san_list());
            return Ok(());
        }
        let s = s.trim();

        match s {
            "" => continue,
            "undo" => {
                chain.pop();
            }
            "tick" => chain.tick(),
            _ => {
                let res = if s.len() == 4 && s.as_bytes()[1].is_ascii_digit() {
                    chain.push_uci(s)
                } else {
                    chain.push_san(s)
                };
                match res {
                    Ok(mv) => println!("Played {}", mv.styled(Style::Utf8)),
                    Err(e) => println!("Bad move: {}", e),
                }
            }
        }
        println!();
    }
}
