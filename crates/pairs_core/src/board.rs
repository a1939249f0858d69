//! Dealt board: the deck plus the visible state of every slot.

use serde::Serialize;

use crate::card::{CardId, SlotIndex, SlotState};
use crate::{BoardSize, Deck};

/// Cards laid out on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    deck: Deck,
    slots: Vec<SlotState>,
}

impl Board {
    /// Lays out a deck with every card face-down.
    pub fn new(deck: Deck) -> Self {
        let slots = vec![SlotState::FaceDown; deck.len()];
        Self { deck, slots }
    }

    /// Returns the dealt deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.deck.size()
    }

    /// Returns the state of one slot.
    pub fn slot(&self, index: SlotIndex) -> Option<SlotState> {
        self.slots.get(index).copied()
    }

    /// Returns the face at a slot.
    pub fn card(&self, index: SlotIndex) -> Option<CardId> {
        self.deck.card(index)
    }

    /// Number of slots in the given state.
    pub fn count(&self, state: SlotState) -> usize {
        self.slots.iter().filter(|s| **s == state).count()
    }

    /// Number of slots on the board.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the board has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sets a slot state; the index must be on the board.
    pub(crate) fn set(&mut self, index: SlotIndex, state: SlotState) {
        self.slots[index] = state;
    }
}
