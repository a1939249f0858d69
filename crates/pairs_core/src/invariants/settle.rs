//! Invariant: a settle in flight refers to two face-up cards of this game.

use super::Invariant;
use crate::GameSession;
use crate::card::SlotState;
use crate::clock::Clock;

/// While processing, both settling slots are distinct and face-up, belong
/// to the current game, and no other card is pending.
pub struct SettleInvariant;

impl<C: Clock> Invariant<GameSession<C>> for SettleInvariant {
    fn holds(session: &GameSession<C>) -> bool {
        let Some(token) = session.settling else {
            return true;
        };
        let Some(board) = &session.board else {
            return false;
        };
        let (first, second) = (*token.first(), *token.second());
        first != second
            && *token.generation() == session.generation
            && session.pending.is_none()
            && board.slot(first) == Some(SlotState::FaceUp)
            && board.slot(second) == Some(SlotState::FaceUp)
    }

    fn description() -> &'static str {
        "Settling cards must be two distinct face-up cards of the current game"
    }
}
