//! Events reported to the presentation host.

use derive_more::Display;
use serde::Serialize;

use crate::card::{CardId, SlotIndex};
use crate::deck::Deck;

/// Something the host should reflect on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// A new deck was dealt; all cards are face-down.
    DeckReady(Deck),
    /// The first selection of a game started the timer.
    Started,
    /// A selection or the play control resumed a paused game.
    Resumed,
    /// The timer was stopped by a pause.
    Paused,
    /// A card was turned face-up.
    SlotFlipped(SlotIndex),
    /// Two face-up cards showed the same face and stay up.
    Match {
        /// Slot flipped first.
        first: SlotIndex,
        /// Slot flipped second.
        second: SlotIndex,
        /// The shared face.
        card: CardId,
    },
    /// Two face-up cards differ; they flip back after the settle delay.
    Mismatch {
        /// Slot flipped first.
        first: SlotIndex,
        /// Slot flipped second.
        second: SlotIndex,
    },
    /// The mismatched cards were turned face-down again.
    SettleComplete(SlotIndex, SlotIndex),
    /// All pairs were found.
    GameComplete {
        /// Time taken, in whole seconds.
        elapsed_seconds: u64,
    },
    /// The finished game set a new best time for its board size.
    NewHighScore {
        /// The new best time.
        seconds: u64,
        /// Who set it.
        player_name: String,
    },
    /// One second of play elapsed.
    TimerTick(u64),
}

/// Why a slot selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SelectionIgnored {
    /// No deck has been dealt.
    #[display("no game in progress")]
    NoGame,
    /// The game is already won.
    #[display("game is over")]
    GameOver,
    /// Mismatched cards are still waiting to flip back.
    #[display("waiting for mismatched cards to flip back")]
    Processing,
    /// The index is not on the board.
    #[display("slot {} is off the board", _0)]
    OutOfRange(SlotIndex),
    /// The card is already part of a found pair.
    #[display("slot {} is already matched", _0)]
    AlreadyMatched(SlotIndex),
    /// The card is already face-up.
    #[display("slot {} is already face-up", _0)]
    AlreadyFaceUp(SlotIndex),
}
