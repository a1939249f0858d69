//! Screen trait, transition type and shared context for the game views.

use std::path::PathBuf;

use crossterm::event::KeyEvent;
use derive_getters::Getters;
use pairs_core::{BoardSize, HighScores};
use ratatui::Frame;
use tracing::{instrument, warn};

use crate::db::ScoreRepository;
use crate::settings::PlayerSettings;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::update`]
/// to drive the [`GameController`](crate::GameController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Save the settings and deal a new game.
    StartGame,
    /// Go back to the settings view, abandoning the game.
    GoToSettings,
    /// Return to the game board.
    GoToBoard,
    /// Show the best-score table.
    GoToBestScores {
        /// Board size whose row is highlighted.
        highlight: Option<BoardSize>,
    },
    /// Exit the application.
    Quit,
}

/// State shared by every screen.
#[derive(Debug, Getters)]
pub struct GameContext {
    scores: HighScores<ScoreRepository>,
    settings: PlayerSettings,
    settings_path: PathBuf,
}

impl GameContext {
    /// Creates a context over a score repository and loaded settings.
    #[instrument(skip(scores, settings))]
    pub fn new(
        scores: HighScores<ScoreRepository>,
        settings: PlayerSettings,
        settings_path: PathBuf,
    ) -> Self {
        Self {
            scores,
            settings,
            settings_path,
        }
    }

    /// Returns the high scores mutably.
    pub fn scores_mut(&mut self) -> &mut HighScores<ScoreRepository> {
        &mut self.scores
    }

    /// Returns the settings mutably.
    pub fn settings_mut(&mut self) -> &mut PlayerSettings {
        &mut self.settings
    }

    /// Writes the settings file. Failures are logged, not raised.
    #[instrument(skip(self))]
    pub fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!(error = %e, "Failed to save settings");
        }
    }
}

/// Trait implemented by each view.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &GameContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut GameContext) -> ScreenTransition;

    /// Processes background work once per loop iteration.
    fn update(&mut self, _ctx: &mut GameContext) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
