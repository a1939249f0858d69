//! Invariant: the matched-pair count agrees with the board.

use super::Invariant;
use crate::GameSession;
use crate::card::SlotState;
use crate::clock::Clock;

/// Matched pairs never exceed the couple count, and exactly two slots are
/// marked matched per found pair.
pub struct MatchedPairsInvariant;

impl<C: Clock> Invariant<GameSession<C>> for MatchedPairsInvariant {
    fn holds(session: &GameSession<C>) -> bool {
        let Some(board) = &session.board else {
            return session.matched_pairs == 0;
        };
        session.matched_pairs <= board.size().couple_count()
            && board.count(SlotState::Matched) == session.matched_pairs * 2
    }

    fn description() -> &'static str {
        "Matched pairs must not exceed the couple count and must match the board"
    }
}
