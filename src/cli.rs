//! Command-line interface for memory_pairs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::DEFAULT_SETTINGS_PATH;

/// Default best-score database file.
pub const DEFAULT_DB_PATH: &str = "memory_pairs.db";

/// Memory Pairs - find every matching pair against the clock
#[derive(Parser, Debug)]
#[command(name = "memory_pairs")]
#[command(about = "Terminal memory-matching game with best times", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the database file (created if it doesn't exist)
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: String,

        /// Path to the player settings file
        #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
        settings: PathBuf,
    },

    /// Print the best time for every board size
    Scores {
        /// Path to the database file
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Delete every best-time record
    ResetScores {
        /// Path to the database file
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::parse_from(["memory_pairs", "play"]);
        let Command::Play { db_path, settings } = cli.command else {
            panic!("expected play");
        };
        assert_eq!(db_path, DEFAULT_DB_PATH);
        assert_eq!(settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
    }

    #[test]
    fn test_reset_scores_path() {
        let cli = Cli::parse_from(["memory_pairs", "reset-scores", "--db-path", "x.db"]);
        assert!(matches!(cli.command, Command::ResetScores { db_path } if db_path == "x.db"));
    }
}
