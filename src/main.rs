//! Memory Pairs - command-line entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use memory_pairs::{Cli, Command, ScoreRepository, run_tui, tui};
use pairs_core::{HighScores, format_time};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { db_path, settings } => {
            tui::init_file_logging()?;
            run_tui(db_path, settings).await
        }
        Command::Scores { db_path } => {
            init_stderr_logging();
            print_scores(&db_path)
        }
        Command::ResetScores { db_path } => {
            init_stderr_logging();
            reset_scores(&db_path)
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the best-score table to stdout.
#[instrument]
fn print_scores(db_path: &str) -> Result<()> {
    let scores = HighScores::new(ScoreRepository::new(db_path)?);
    println!("{:<8} {:<10} Player", "Board", "Time");
    for row in scores.table()? {
        let size = format!("{0}x{0}", row.board_size());
        match row.best() {
            Some(best) => println!(
                "{:<8} {:<10} {}",
                size,
                format_time(*best.seconds()),
                best.player_name()
            ),
            None => println!("{:<8} {:<10} -", size, "--:--:--"),
        }
    }
    Ok(())
}

/// Deletes every best-score record.
#[instrument]
fn reset_scores(db_path: &str) -> Result<()> {
    let removed = ScoreRepository::new(db_path)?.clear()?;
    info!(removed, "Best scores reset");
    println!("Removed {} best-score record(s)", removed);
    Ok(())
}
