use std::time::Instant;

use clap::Parser;
use referee_core::{
    game::{Game, GameMode},
    notation::UciMove,
    perft::{divide, perft},
    position::Position,
};

/// Counts move paths from a position to check the referee's move generation
/// against published node counts.
#[derive(Parser, Debug)]
struct Args {
    /// Position to count from: "startpos" or a FEN string.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: Position,

    /// Moves in long coordinate notation (e.g. `e2e4`, `a7a8q`) played on the
    /// position before counting.
    #[arg(short, long, num_args(0..))]
    moves: Vec<UciMove>,

    /// Depth to count to.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..), default_value_t = 4)]
    depth: u8,

    /// Print the count below each legal first move instead of per-depth
    /// totals.
    #[arg(long)]
    divide: bool,
}

fn parse_position(s: &str) -> Result<Position, String> {
    match s {
        "startpos" => Ok(Position::new()),
        fen => Position::from_fen(fen).map_err(|e| format!("not `startpos` or valid FEN: {e}")),
    }
}

fn count_each_depth(position: &Position, max_depth: usize) {
    let started = Instant::now();
    let mut last_nodes = 0;

    for depth in 1..=max_depth {
        let depth_started = Instant::now();
        last_nodes = perft(position, depth);
        println!(
            "depth {depth:>2}  {last_nodes:>12} nodes  {:>8.3}s",
            depth_started.elapsed().as_secs_f64()
        );
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!();
    println!(
        "{last_nodes} nodes at depth {max_depth}, {elapsed:.3}s in total ({:.0} nodes/s)",
        last_nodes as f64 / elapsed
    );
}

fn count_by_first_move(position: &Position, depth: usize) {
    let split = divide(position, depth);
    for (first_move, nodes) in &split {
        println!("{}: {nodes}", UciMove::from(*first_move));
    }

    println!();
    println!("{} moves, {} nodes", split.len(), split.iter().map(|(_, nodes)| nodes).sum::<u64>());
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let mut game = Game::from_position(args.position, GameMode::Standard);
    for uci in args.moves {
        game.make_uci_move(uci)
            .map_err(|e| format!("cannot play {uci} in {}: {e}", game.fen()))?;
    }

    let depth = usize::from(args.depth);
    if args.divide {
        count_by_first_move(game.position(), depth);
    } else {
        count_each_depth(game.position(), depth);
    }

    Ok(())
}
