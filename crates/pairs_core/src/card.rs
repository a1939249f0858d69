//! Card faces and slot states.

use serde::{Deserialize, Serialize};

use crate::GameError;

/// Number of distinct card faces available.
pub const CARD_POOL_SIZE: usize = 37;

/// Position of a card on the board, row-major (`row * side + col`).
pub type SlotIndex = usize;

/// Identifier of a card face, in `1..=37`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardId(u8);

impl CardId {
    /// Creates a card id, rejecting values outside the face pool.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if value == 0 || usize::from(value) > CARD_POOL_SIZE {
            return Err(GameError::InvalidCardId(value));
        }
        Ok(Self(value))
    }

    /// Card id for a zero-based pool index.
    pub(crate) fn from_pool_index(index: usize) -> Self {
        debug_assert!(index < CARD_POOL_SIZE, "pool index {index} out of range");
        // Pool has 37 entries, so index + 1 always fits.
        Self(index as u8 + 1)
    }

    /// Returns the raw id.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CardId {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardId> for u8 {
    fn from(card: CardId) -> Self {
        card.0
    }
}

/// Visible state of one board slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum SlotState {
    /// Card is hidden.
    #[default]
    FaceDown,
    /// Card is shown but not yet part of a matched pair.
    FaceUp,
    /// Card belongs to a found pair and stays shown.
    Matched,
}

impl SlotState {
    /// Returns true if the card face is visible.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::FaceDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_bounds() {
        assert!(CardId::new(1).is_ok());
        assert!(CardId::new(37).is_ok());
        assert_eq!(CardId::new(0), Err(GameError::InvalidCardId(0)));
        assert_eq!(CardId::new(38), Err(GameError::InvalidCardId(38)));
    }

    #[test]
    fn test_pool_index_is_one_based() {
        assert_eq!(CardId::from_pool_index(0).get(), 1);
        assert_eq!(CardId::from_pool_index(36).get(), 37);
    }
}
