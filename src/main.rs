use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use kestrel::chess_errors::ChessResult;
use kestrel::game_state::chess_rules::STARTING_POSITION_FEN;
use kestrel::game_state::game_state::GameState;
use kestrel::move_generation::move_generator::PseudoLegalMoveGenerator;
use kestrel::search::board_scoring::PawnStructureScorer;
use kestrel::search::iterative_deepening::{format_line, iterative_deepening_search, SearchConfig, SearchResult};
use kestrel::utils::long_algebraic::apply_move_list;

/// Search a position and print the best move, principal variation and
/// search statistics.
#[derive(Debug, Parser)]
#[command(name = "kestrel", version)]
struct Cli {
    /// Position to search, in FEN.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// Iterative-deepening target depth.
    #[arg(long, default_value_t = SearchConfig::default().max_depth)]
    depth: u8,

    /// Transposition table size in MiB.
    #[arg(long = "hash-mb", default_value_t = 16)]
    hash_mb: usize,

    /// Moves to play from the FEN before searching, e.g. "e2e4 e7e5".
    #[arg(long, default_value = "")]
    moves: String,

    /// Search moves in generation order.
    #[arg(long)]
    no_ordering: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(result) => {
            print_report(&result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "cannot search position");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ChessResult<SearchResult> {
    let generator = PseudoLegalMoveGenerator;
    let mut game_state = GameState::from_fen(&cli.fen)?;
    apply_move_list(&mut game_state, &cli.moves, &generator)?;

    let config = SearchConfig {
        max_depth: cli.depth,
        tt_size_bytes: cli.hash_mb.max(1) * 1024 * 1024,
        move_ordering: !cli.no_ordering,
    };
    Ok(iterative_deepening_search(
        &mut game_state,
        &generator,
        &PawnStructureScorer::default(),
        config,
    ))
}

fn print_report(result: &SearchResult) {
    for iteration in &result.iterations {
        println!(
            "depth {:>2}  score {:>6}  nodes {:>10}  pv {}",
            iteration.depth,
            iteration.score,
            iteration.nodes,
            format_line(&iteration.pv)
        );
    }
    match result.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    println!("{}", result.info);
    println!("time:             {} ms", result.elapsed_ms);
}
