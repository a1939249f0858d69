//! Memory Pairs - terminal host for the pairs game.
//!
//! Wires the [`pairs_core`] session to a tokio-driven clock, a SQLite
//! best-score store and a ratatui interface.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod db;
pub mod settings;
pub mod timer;
pub mod tui;

pub use cli::{Cli, Command, DEFAULT_DB_PATH};
pub use db::{BestScoreRecord, DbError, DbErrorKind, NewBestScore, ScoreRepository};
pub use settings::{DEFAULT_SETTINGS_PATH, MAX_NAME_LEN, PlayerSettings, SettingsError};
pub use timer::{ClockEvent, TokioClock};
pub use tui::{
    BestScoresScreen, BoardScreen, GameContext, GameController, Screen, ScreenTransition,
    SettingsScreen, move_cursor, run_tui,
};
