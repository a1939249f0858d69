//! First-class invariants for a game session.
//!
//! Invariants are logical properties that must hold after every session
//! operation. They are checked in debug builds and can be tested
//! independently.

mod matched_pairs;
mod pending_slot;
mod settle;

pub use matched_pairs::MatchedPairsInvariant;
pub use pending_slot::PendingSlotInvariant;
pub use settle::SettleInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (MatchedPairsInvariant, PendingSlotInvariant, SettleInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::SlotState;
    use crate::clock::SettleToken;
    use crate::{BoardSize, Deck, GameSession, ManualClock};

    fn session() -> GameSession<ManualClock> {
        let mut session = GameSession::new(ManualClock::new(), "Ada");
        session.deal(Deck::from_cards(BoardSize::Two, &[1, 2, 1, 2]).unwrap());
        session
    }

    #[test]
    fn test_invariants_hold_for_fresh_and_idle_sessions() {
        let idle = GameSession::new(ManualClock::new(), "Ada");
        assert!(SessionInvariants::check_all(&idle).is_ok());
        assert!(SessionInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_invariants_hold_through_play() {
        let mut s = session();
        s.select_slot(0);
        s.select_slot(2);
        assert!(SessionInvariants::check_all(&s).is_ok());
        s.select_slot(1);
        s.select_slot(0);
        assert!(SessionInvariants::check_all(&s).is_ok());
    }

    #[test]
    fn test_detects_matched_count_drift() {
        let mut s = session();
        s.matched_pairs = 3;
        let violations = SessionInvariants::check_all(&s).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <MatchedPairsInvariant as Invariant<GameSession<ManualClock>>>::description()
        );
    }

    #[test]
    fn test_detects_face_down_pending_slot() {
        let mut s = session();
        s.pending = Some(1);
        let violations = SessionInvariants::check_all(&s).unwrap_err();
        assert!(violations.iter().any(|v| v.description
            == <PendingSlotInvariant as Invariant<GameSession<ManualClock>>>::description()));
    }

    #[test]
    fn test_detects_settle_with_face_down_cards() {
        let mut s = session();
        s.settling = Some(SettleToken::new(s.generation, 0, 1));
        let violations = SessionInvariants::check_all(&s).unwrap_err();
        assert!(violations.iter().any(|v| v.description
            == <SettleInvariant as Invariant<GameSession<ManualClock>>>::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let mut s = session();
        if let Some(board) = s.board.as_mut() {
            board.set(3, SlotState::FaceUp);
        }
        type TwoInvariants = (MatchedPairsInvariant, SettleInvariant);
        assert!(TwoInvariants::check_all(&s).is_ok());
    }
}
