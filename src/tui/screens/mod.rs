//! Individual views of the game.

mod best_scores;
mod board;
mod settings;

pub use best_scores::BestScoresScreen;
pub use board::BoardScreen;
pub use settings::SettingsScreen;
