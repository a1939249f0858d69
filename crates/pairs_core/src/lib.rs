//! Pairs core - memory-matching game logic.
//!
//! This crate holds everything about a game of pairs that does not touch a
//! screen, a timer or a disk.
//!
//! # Architecture
//!
//! - **Deck**: shuffled, paired card faces for a board size
//! - **Session**: the state machine driven by slot selections, timer ticks
//!   and settle completions
//! - **Scores**: best time per board size behind a [`ScoreStore`]
//! - **Collaborators**: [`RandomSource`], [`Clock`] and [`ScoreStore`] are
//!   supplied by the host
//!
//! # Example
//!
//! ```
//! use pairs_core::{BoardSize, Deck, GameEvent, GameSession, ManualClock};
//!
//! let mut session = GameSession::new(ManualClock::new(), "Ada");
//! session.deal(Deck::from_cards(BoardSize::Two, &[3, 3, 7, 7]).unwrap());
//!
//! session.select_slot(0);
//! let events = session.select_slot(1);
//! assert!(matches!(events.last(), Some(GameEvent::Match { .. })));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod board_size;
mod card;
mod clock;
mod deck;
mod error;
mod events;
mod invariants;
mod random;
mod score;
mod session;
mod time;

pub use board::Board;
pub use board_size::BoardSize;
pub use card::{CARD_POOL_SIZE, CardId, SlotIndex, SlotState};
pub use clock::{Clock, ManualClock, SETTLE_DELAY, SettleToken, TICK_PERIOD, TimerEpoch};
pub use deck::{Deck, generate_deck};
pub use error::GameError;
pub use events::{GameEvent, SelectionIgnored};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MatchedPairsInvariant, PendingSlotInvariant,
    SessionInvariants, SettleInvariant,
};
pub use random::RandomSource;
pub use score::{BestScore, HighScores, MemoryScoreStore, ScoreRow, ScoreStore};
pub use session::{GameSession, Phase};
pub use time::format_time;
