//! Player settings: the last used name and board size, kept in a TOML file.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use pairs_core::BoardSize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default settings file name.
pub const DEFAULT_SETTINGS_PATH: &str = "memory_pairs.toml";

/// Longest player name the settings view accepts.
pub const MAX_NAME_LEN: usize = 24;

/// Preferences remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Name recorded with best scores.
    #[serde(default)]
    player_name: String,

    /// Board side length.
    #[serde(default)]
    board_size: BoardSize,
}

impl PlayerSettings {
    /// Creates settings with the given name and size.
    #[instrument(skip(player_name), fields(player = %player_name.as_ref()))]
    pub fn new(player_name: impl AsRef<str>, board_size: BoardSize) -> Self {
        Self {
            player_name: player_name.as_ref().to_string(),
            board_size,
        }
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(player = %settings.player_name, size = %settings.board_size, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if !path.as_ref().exists() {
            debug!("No settings file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Loads settings for the game host.
    ///
    /// A missing file or one that cannot be read or parsed (for example an
    /// unsupported board size) yields defaults; the error is logged.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_for_host(path: impl AsRef<Path>) -> Self {
        match Self::load_or_default(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Ignoring unusable settings file");
                Self::default()
            }
        }
    }

    /// Writes settings to a TOML file.

    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if serialization or the write fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = toml::to_string(self)
            .map_err(|e| SettingsError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| SettingsError::new(format!("Failed to write settings file: {}", e)))?;
        info!(player = %self.player_name, size = %self.board_size, "Settings saved");
        Ok(())
    }

    /// Returns true when a game may be started with these settings.
    pub fn can_start(&self) -> bool {
        !self.player_name.trim().is_empty()
    }

    /// Appends a character to the player name. Control characters and
    /// input past [`MAX_NAME_LEN`] are ignored.
    pub fn push_char(&mut self, c: char) {
        if c.is_control() || self.player_name.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.player_name.push(c);
    }

    /// Removes the last character of the player name.
    pub fn pop_char(&mut self) {
        self.player_name.pop();
    }

    /// Selects the next larger board size, wrapping.
    pub fn next_size(&mut self) {
        self.board_size = self.board_size.next();
    }

    /// Selects the next smaller board size, wrapping.
    pub fn previous_size(&mut self) {
        self.board_size = self.board_size.previous();
    }
}

/// Settings file error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_start_requires_name() {
        let mut settings = PlayerSettings::default();
        assert!(!settings.can_start());
        settings.push_char(' ');
        assert!(!settings.can_start());
        settings.pop_char();
        settings.push_char('A');
        assert!(settings.can_start());
    }

    #[test]
    fn test_name_ignores_control_and_overflow() {
        let mut settings = PlayerSettings::default();
        settings.push_char('\n');
        assert_eq!(settings.player_name(), "");
        for _ in 0..MAX_NAME_LEN + 5 {
            settings.push_char('x');
        }
        assert_eq!(settings.player_name().len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_size_cycles() {
        let mut settings = PlayerSettings::default();
        settings.previous_size();
        assert_eq!(*settings.board_size(), BoardSize::Eight);
        settings.next_size();
        assert_eq!(*settings.board_size(), BoardSize::Two);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: PlayerSettings = toml::from_str("player_name = \"Ada\"").unwrap();
        assert_eq!(settings.player_name(), "Ada");
        assert_eq!(*settings.board_size(), BoardSize::Two);
    }
}
