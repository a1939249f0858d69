//! Error types for the pairs game core.

use derive_more::Display;

/// Error raised by deck construction and session setup.
///
/// Slot selections never produce an error: an invalid click is ignored
/// (see [`SelectionIgnored`](crate::SelectionIgnored)).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameError {
    /// Board size is not one of 2, 4, 6 or 8.
    #[display("Invalid board size {}: expected one of 2, 4, 6, 8", _0)]
    InvalidBoardSize(u8),

    /// Card identifier is outside the face pool.
    #[display("Invalid card id {}: expected a value in 1..=37", _0)]
    InvalidCardId(u8),

    /// An explicit card sequence does not form a paired deck.
    #[display("Invalid deck: {}", _0)]
    InvalidDeck(String),

    /// Restart was requested before any game was dealt.
    #[display("No board size has been chosen yet")]
    NoBoardSize,
}

impl std::error::Error for GameError {}
