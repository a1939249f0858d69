//! Board sizes supported by the game.

use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

use crate::GameError;

/// Side length of the square board.
///
/// Only even sizes up to 8 are playable: an 8×8 board needs 32 distinct
/// faces, which still fits in the pool of 37.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum BoardSize {
    /// 2×2 board, 2 pairs.
    #[default]
    Two,
    /// 4×4 board, 8 pairs.
    Four,
    /// 6×6 board, 18 pairs.
    Six,
    /// 8×8 board, 32 pairs.
    Eight,
}

impl BoardSize {
    /// Returns the side length.
    pub fn get(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Total number of cards on the board (side²).
    pub fn card_count(self) -> usize {
        let side = usize::from(self.get());
        side * side
    }

    /// Number of pairs on the board (side² / 2).
    pub fn couple_count(self) -> usize {
        self.card_count() / 2
    }

    /// Next larger size, wrapping from 8 back to 2.
    #[instrument]
    pub fn next(self) -> Self {
        match self {
            Self::Two => Self::Four,
            Self::Four => Self::Six,
            Self::Six => Self::Eight,
            Self::Eight => Self::Two,
        }
    }

    /// Next smaller size, wrapping from 2 up to 8.
    #[instrument]
    pub fn previous(self) -> Self {
        match self {
            Self::Two => Self::Eight,
            Self::Four => Self::Two,
            Self::Six => Self::Four,
            Self::Eight => Self::Six,
        }
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            other => Err(GameError::InvalidBoardSize(other)),
        }
    }
}

impl From<BoardSize> for u8 {
    fn from(size: BoardSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_counts() {
        assert_eq!(BoardSize::Two.card_count(), 4);
        assert_eq!(BoardSize::Two.couple_count(), 2);
        assert_eq!(BoardSize::Eight.card_count(), 64);
        assert_eq!(BoardSize::Eight.couple_count(), 32);
    }

    #[test]
    fn test_try_from_rejects_odd_and_out_of_range() {
        for raw in [0u8, 1, 3, 5, 7, 9, 10, 255] {
            assert_eq!(BoardSize::try_from(raw), Err(GameError::InvalidBoardSize(raw)));
        }
    }

    #[test]
    fn test_iteration_covers_all_sizes_in_order() {
        let sides: Vec<u8> = BoardSize::iter().map(BoardSize::get).collect();
        assert_eq!(sides, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(BoardSize::Eight.next(), BoardSize::Two);
        assert_eq!(BoardSize::Two.previous(), BoardSize::Eight);
        for size in BoardSize::iter() {
            assert_eq!(size.next().previous(), size);
        }
    }

    #[test]
    fn test_serde_uses_side_length() {
        let json = serde_json::to_string(&BoardSize::Six).unwrap();
        assert_eq!(json, "6");
        let parsed: BoardSize = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, BoardSize::Four);
        assert!(serde_json::from_str::<BoardSize>("5").is_err());
    }
}
