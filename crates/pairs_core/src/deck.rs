//! Deck generation.
//!
//! A deck is the row-major sequence of card faces laid out on the board.
//! Every face in a deck appears exactly twice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::card::{CARD_POOL_SIZE, CardId, SlotIndex};
use crate::random::{RandomSource, free_index};
use crate::{BoardSize, GameError};

/// A shuffled, paired sequence of card faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    size: BoardSize,
    cards: Vec<CardId>,
}

impl Deck {
    /// Deals a new deck for the board size.
    ///
    /// Picks `couple_count` distinct faces from the pool, then drops each
    /// face into two random free positions. Every position ends up filled
    /// and no face is picked twice; the permutation is not guaranteed to be
    /// exactly uniform.
    #[instrument(skip(rng))]
    pub fn generate<R: RandomSource>(size: BoardSize, rng: &mut R) -> Self {
        let mut used_faces = [false; CARD_POOL_SIZE];
        let mut positions: Vec<Option<CardId>> = vec![None; size.card_count()];

        for _ in 0..size.couple_count() {
            let pool_index = free_index(&used_faces, |used| *used, rng);
            used_faces[pool_index] = true;
            let card = CardId::from_pool_index(pool_index);

            for _ in 0..2 {
                let position = free_index(&positions, Option::is_some, rng);
                positions[position] = Some(card);
            }
        }

        let cards: Vec<CardId> = positions.into_iter().flatten().collect();
        debug_assert_eq!(cards.len(), size.card_count());
        debug!(size = %size, cards = cards.len(), "Deck generated");
        Self { size, cards }
    }

    /// Builds a deck from an explicit face sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCardId`] for a face outside the pool and
    /// [`GameError::InvalidDeck`] if the length does not match the board or a
    /// face does not appear exactly twice.
    #[instrument]
    pub fn from_cards(size: BoardSize, cards: &[u8]) -> Result<Self, GameError> {
        if cards.len() != size.card_count() {
            return Err(GameError::InvalidDeck(format!(
                "expected {} cards for a {}x{} board, got {}",
                size.card_count(),
                size,
                size,
                cards.len()
            )));
        }

        let cards = cards
            .iter()
            .map(|&raw| CardId::new(raw))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((card, count)) = face_counts(&cards).into_iter().find(|(_, n)| *n != 2) {
            return Err(GameError::InvalidDeck(format!(
                "card {} appears {} times, expected 2",
                card, count
            )));
        }

        Ok(Self { size, cards })
    }

    /// Returns the board size this deck was dealt for.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the faces in row-major order.
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Returns the face at a slot.
    pub fn card(&self, index: SlotIndex) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the deck holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Distinct faces in the deck, with how often each appears.
    pub fn faces(&self) -> BTreeMap<CardId, usize> {
        face_counts(&self.cards)
    }
}

/// Deals a deck for a raw board side length.
///
/// # Errors
///
/// Returns [`GameError::InvalidBoardSize`] unless `board_size` is 2, 4, 6 or 8.
#[instrument(skip(rng))]
pub fn generate_deck<R: RandomSource>(board_size: u8, rng: &mut R) -> Result<Deck, GameError> {
    let size = BoardSize::try_from(board_size)?;
    Ok(Deck::generate(size, rng))
}

fn face_counts(cards: &[CardId]) -> BTreeMap<CardId, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
    }
    counts
}
