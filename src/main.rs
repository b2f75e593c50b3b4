use anyhow::{Context, Result};
use bughouse_core::SuperBoard;
use bughouse_engine::{MaterialPositionPocket, Runner, SearchConfig, SearchEngine, Seat};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let max_moves = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid move cap {arg:?}"))?,
        None => bughouse_engine::runner::DEFAULT_MAX_MOVES,
    };
    info!(max_moves, "bughouse starting");

    let config = SearchConfig {
        communicating: true,
        ..SearchConfig::default()
    };
    let engines = Seat::ALL.map(|seat| {
        SearchEngine::new(
            seat.board,
            seat.color,
            Box::new(MaterialPositionPocket::default()),
            config,
        )
    });

    let mut runner = Runner::new(SuperBoard::new(), engines)?.with_max_moves(max_moves);
    let record = runner.play().context("game aborted")?;

    match record.result {
        Some(over) => info!(plies = record.plies(), result = %over, "game finished"),
        None => info!(plies = record.plies(), "game stopped at move cap"),
    }
    Ok(())
}
