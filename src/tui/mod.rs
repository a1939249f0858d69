//! Terminal UI for Memory Pairs.

mod controller;
mod input;
mod screen;
mod screens;

pub use controller::GameController;
pub use input::move_cursor;
pub use screen::{GameContext, Screen, ScreenTransition};
pub use screens::{BestScoresScreen, BoardScreen, SettingsScreen};

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pairs_core::HighScores;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::db::ScoreRepository;
use crate::settings::PlayerSettings;

/// Log file written while the terminal UI owns the screen.
pub const LOG_FILE: &str = "memory_pairs.log";

/// Routes tracing output to [`LOG_FILE`] so it does not corrupt the terminal.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_file_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the terminal game until the player quits.
///
/// # Errors
///
/// Returns an error if the database or the terminal cannot be set up. An
/// unusable settings file falls back to defaults.
#[instrument(skip(db_path, settings_path), fields(db_path = %db_path, settings = %settings_path.display()))]
pub async fn run_tui(db_path: String, settings_path: PathBuf) -> Result<()> {
    info!("Starting Memory Pairs TUI");

    let repo = ScoreRepository::new(&db_path)?;
    let settings = PlayerSettings::load_for_host(&settings_path);
    let ctx = GameContext::new(HighScores::new(repo), settings, settings_path);
    let mut controller = GameController::new(ctx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}
