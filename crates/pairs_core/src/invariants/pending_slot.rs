//! Invariant: every face-up card is accounted for.

use super::Invariant;
use crate::GameSession;
use crate::card::SlotState;
use crate::clock::Clock;

/// The pending slot, if any, is face-up, and the only face-up cards are the
/// pending one or the two waiting to settle.
pub struct PendingSlotInvariant;

impl<C: Clock> Invariant<GameSession<C>> for PendingSlotInvariant {
    fn holds(session: &GameSession<C>) -> bool {
        let Some(board) = &session.board else {
            return session.pending.is_none();
        };
        let pending_face_up = session
            .pending
            .is_none_or(|p| board.slot(p) == Some(SlotState::FaceUp));
        let expected =
            usize::from(session.pending.is_some()) + if session.settling.is_some() { 2 } else { 0 };
        pending_face_up && board.count(SlotState::FaceUp) == expected
    }

    fn description() -> &'static str {
        "Face-up cards must be the pending card or the pair waiting to settle"
    }
}
