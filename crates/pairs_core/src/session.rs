//! Game session state machine.
//!
//! A session owns one board at a time and moves through
//! `Idle → Ready → Running ⇄ Paused → Won`, returning to `Ready` on restart.
//! While mismatched cards wait to flip back, the session is additionally
//! *processing* and ignores selections.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::card::{SlotIndex, SlotState};
use crate::clock::{Clock, SETTLE_DELAY, SettleToken, TimerEpoch};
use crate::events::{GameEvent, SelectionIgnored};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::random::RandomSource;
use crate::{BoardSize, Deck, GameError};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Phase {
    /// No deck dealt yet.
    Idle,
    /// Deck dealt, timer at zero, waiting for the first selection.
    Ready,
    /// Timer running, selections accepted.
    Running,
    /// Timer stopped, board visible.
    Paused,
    /// All pairs found.
    Won,
}

/// One player's game of pairs.
///
/// The session is an owned value held by the host. The host forwards slot
/// selections, timer ticks and settle completions; every operation returns
/// the events to reflect.
#[derive(Debug)]
pub struct GameSession<C: Clock> {
    pub(crate) clock: C,
    pub(crate) player_name: String,
    pub(crate) board: Option<Board>,
    pub(crate) phase: Phase,
    pub(crate) pending: Option<SlotIndex>,
    pub(crate) settling: Option<SettleToken>,
    pub(crate) matched_pairs: usize,
    pub(crate) elapsed_seconds: u64,
    pub(crate) epoch: TimerEpoch,
    pub(crate) generation: u64,
}

impl<C: Clock> GameSession<C> {
    /// Creates an idle session for a player.
    #[instrument(skip(clock, player_name), fields(player = %player_name.as_ref()))]
    pub fn new(clock: C, player_name: impl AsRef<str>) -> Self {
        info!("Creating game session");
        Self {
            clock,
            player_name: player_name.as_ref().to_string(),
            board: None,
            phase: Phase::Idle,
            pending: None,
            settling: None,
            matched_pairs: 0,
            elapsed_seconds: 0,
            epoch: TimerEpoch::default(),
            generation: 0,
        }
    }

    /// Deals a fresh game for a raw board side length.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidBoardSize`] unless `board_size` is 2, 4, 6
    /// or 8. The session is left untouched on error.
    #[instrument(skip(self, rng))]
    pub fn new_game<R: RandomSource>(
        &mut self,
        board_size: u8,
        rng: &mut R,
    ) -> Result<GameEvent, GameError> {
        let size = BoardSize::try_from(board_size).inspect_err(|e| {
            warn!(error = %e, "Rejected new game");
        })?;
        Ok(self.deal(Deck::generate(size, rng)))
    }

    /// Deals a new game with the same board size as the current one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoBoardSize`] if no game was ever dealt.
    #[instrument(skip(self, rng))]
    pub fn restart<R: RandomSource>(&mut self, rng: &mut R) -> Result<GameEvent, GameError> {
        let size = self.board_size().ok_or(GameError::NoBoardSize)?;
        Ok(self.deal(Deck::generate(size, rng)))
    }

    /// Lays out a given deck and resets all counters.
    ///
    /// Settle completions and ticks issued for the previous game are
    /// discarded when they arrive.
    #[instrument(skip(self, deck), fields(size = %deck.size()))]
    pub fn deal(&mut self, deck: Deck) -> GameEvent {
        if self.phase == Phase::Running {
            self.clock.stop_ticking();
        }
        self.epoch = self.epoch.next();
        self.generation += 1;
        self.board = Some(Board::new(deck.clone()));
        self.phase = Phase::Ready;
        self.pending = None;
        self.settling = None;
        self.matched_pairs = 0;
        self.elapsed_seconds = 0;
        info!(generation = self.generation, "New game dealt");
        self.assert_invariants();
        GameEvent::DeckReady(deck)
    }

    /// Reports why a selection would be ignored, or `None` if it would flip
    /// the card.
    pub fn explain_selection(&self, index: SlotIndex) -> Option<SelectionIgnored> {
        let Some(board) = &self.board else {
            return Some(SelectionIgnored::NoGame);
        };
        if self.phase == Phase::Won {
            return Some(SelectionIgnored::GameOver);
        }
        if self.settling.is_some() {
            return Some(SelectionIgnored::Processing);
        }
        match board.slot(index) {
            None => Some(SelectionIgnored::OutOfRange(index)),
            Some(SlotState::Matched) => Some(SelectionIgnored::AlreadyMatched(index)),
            Some(SlotState::FaceUp) => Some(SelectionIgnored::AlreadyFaceUp(index)),
            Some(SlotState::FaceDown) => None,
        }
    }

    /// Flips the card at `index`.
    ///
    /// Ignored selections return no events. The first selection of a game,
    /// or any selection while paused, starts the timer before flipping.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn select_slot(&mut self, index: SlotIndex) -> Vec<GameEvent> {
        if let Some(reason) = self.explain_selection(index) {
            debug!(index, %reason, "Selection ignored");
            return Vec::new();
        }

        let mut events = Vec::new();
        match self.phase {
            Phase::Ready => {
                self.start_timer();
                events.push(GameEvent::Started);
            }
            Phase::Paused => {
                self.start_timer();
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }

        let Some(board) = self.board.as_mut() else {
            return events;
        };
        board.set(index, SlotState::FaceUp);
        events.push(GameEvent::SlotFlipped(index));

        let Some(first) = self.pending.take() else {
            debug!(index, "First card of pair flipped");
            self.pending = Some(index);
            self.assert_invariants();
            return events;
        };

        let (first_card, second_card) = (board.card(first), board.card(index));
        match (first_card, second_card) {
            (Some(card), Some(other)) if card == other => {
                board.set(first, SlotState::Matched);
                board.set(index, SlotState::Matched);
                self.matched_pairs += 1;
                let couples = board.size().couple_count();
                info!(first, second = index, %card, matched = self.matched_pairs, couples, "Match");
                events.push(GameEvent::Match {
                    first,
                    second: index,
                    card,
                });
                if self.matched_pairs == couples {
                    events.push(self.finish());
                }
            }
            _ => {
                let token = SettleToken::new(self.generation, first, index);
                self.settling = Some(token);
                self.clock.schedule_settle(token, SETTLE_DELAY);
                info!(first, second = index, "Mismatch");
                events.push(GameEvent::Mismatch {
                    first,
                    second: index,
                });
            }
        }

        self.assert_invariants();
        events
    }

    /// Flips mismatched cards back face-down.
    ///
    /// Runs whether or not the game was paused in the meantime. Tokens that
    /// do not match the settle in flight (for example, from a game that has
    /// since been restarted) are discarded.
    #[instrument(skip(self))]
    pub fn complete_settle(&mut self, token: SettleToken) -> Option<GameEvent> {
        if self.settling != Some(token) {
            debug!(?token, "Discarding stale settle");
            return None;
        }
        let board = self.board.as_mut()?;
        let (first, second) = (*token.first(), *token.second());
        board.set(first, SlotState::FaceDown);
        board.set(second, SlotState::FaceDown);
        self.settling = None;
        self.pending = None;
        debug!(first, second, "Mismatched cards flipped back");
        self.assert_invariants();
        Some(GameEvent::SettleComplete(first, second))
    }

    /// Advances the timer by one second.
    ///
    /// Ticks are counted only while running and only for the current timer
    /// epoch; a tick that raced a pause is dropped.
    #[instrument(skip(self))]
    pub fn tick(&mut self, epoch: TimerEpoch) -> Option<GameEvent> {
        if self.phase != Phase::Running || epoch != self.epoch {
            debug!(?epoch, current = ?self.epoch, phase = %self.phase, "Discarding tick");
            return None;
        }
        self.elapsed_seconds += 1;
        Some(GameEvent::TimerTick(self.elapsed_seconds))
    }

    /// Stops the timer. Only valid while running.
    ///
    /// Once this returns, no tick from before the pause can change the
    /// elapsed time. A settle already in flight still completes.
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Option<GameEvent> {
        if self.phase != Phase::Running {
            debug!(phase = %self.phase, "Pause ignored");
            return None;
        }
        self.clock.stop_ticking();
        self.epoch = self.epoch.next();
        self.phase = Phase::Paused;
        info!(elapsed = self.elapsed_seconds, "Paused");
        Some(GameEvent::Paused)
    }

    /// Starts or resumes the timer without flipping a card.
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Option<GameEvent> {
        let event = match self.phase {
            Phase::Paused => GameEvent::Resumed,
            Phase::Ready => GameEvent::Started,
            other => {
                debug!(phase = %other, "Resume ignored");
                return None;
            }
        };
        self.start_timer();
        Some(event)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while mismatched cards wait to flip back.
    pub fn is_processing(&self) -> bool {
        self.settling.is_some()
    }

    /// Returns the board size of the current game.
    pub fn board_size(&self) -> Option<BoardSize> {
        self.board.as_ref().map(Board::size)
    }

    /// Returns the dealt board.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Returns the dealt deck.
    pub fn deck(&self) -> Option<&Deck> {
        self.board.as_ref().map(Board::deck)
    }

    /// Returns the state of one slot.
    pub fn slot_state(&self, index: SlotIndex) -> Option<SlotState> {
        self.board.as_ref().and_then(|b| b.slot(index))
    }

    /// Returns the face-up slot waiting for its partner.
    pub fn pending_slot(&self) -> Option<SlotIndex> {
        self.pending
    }

    /// Number of pairs found so far.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Number of pairs on the board (zero before the first deal).
    pub fn couple_count(&self) -> usize {
        self.board_size().map_or(0, BoardSize::couple_count)
    }

    /// Whole seconds of play.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Epoch of the current timer run.
    pub fn timer_epoch(&self) -> TimerEpoch {
        self.epoch
    }

    /// Returns the player's name.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Returns the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the clock mutably.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn start_timer(&mut self) {
        self.epoch = self.epoch.next();
        self.clock.start_ticking(self.epoch);
        self.phase = Phase::Running;
        info!(elapsed = self.elapsed_seconds, "Timer running");
    }

    fn finish(&mut self) -> GameEvent {
        self.clock.stop_ticking();
        self.epoch = self.epoch.next();
        self.phase = Phase::Won;
        info!(elapsed = self.elapsed_seconds, "Game complete");
        GameEvent::GameComplete {
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    fn assert_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = SessionInvariants::check_all(self)
        {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariant violated");
            debug_assert!(false, "Session invariants violated: {descriptions}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn dealt(cards: &[u8]) -> GameSession<ManualClock> {
        let size = match cards.len() {
            4 => BoardSize::Two,
            16 => BoardSize::Four,
            _ => panic!("unsupported fixture"),
        };
        let mut session = GameSession::new(ManualClock::new(), "Ada");
        session.deal(Deck::from_cards(size, cards).unwrap());
        session
    }

    #[test]
    fn test_explain_selection_reasons() {
        let session = GameSession::new(ManualClock::new(), "Ada");
        assert_eq!(session.explain_selection(0), Some(SelectionIgnored::NoGame));

        let mut session = dealt(&[1, 2, 1, 2]);
        assert_eq!(session.explain_selection(4), Some(SelectionIgnored::OutOfRange(4)));
        session.select_slot(0);
        assert_eq!(session.explain_selection(0), Some(SelectionIgnored::AlreadyFaceUp(0)));
        session.select_slot(1);
        assert_eq!(session.explain_selection(3), Some(SelectionIgnored::Processing));
    }

    #[test]
    fn test_first_selection_starts_timer() {
        let mut session = dealt(&[1, 2, 1, 2]);
        let events = session.select_slot(0);
        assert_eq!(events, vec![GameEvent::Started, GameEvent::SlotFlipped(0)]);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(*session.clock().ticking(), Some(session.timer_epoch()));
    }

    #[test]
    fn test_deal_while_running_stops_clock() {
        let mut session = dealt(&[1, 2, 1, 2]);
        session.select_slot(0);
        session.deal(Deck::from_cards(BoardSize::Two, &[5, 5, 6, 6]).unwrap());
        assert_eq!(*session.clock().stops(), 1);
        assert_eq!(*session.clock().ticking(), None);
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_restart_without_game_fails() {
        let mut session = GameSession::new(ManualClock::new(), "Ada");
        let mut rng = rand::rng();
        assert_eq!(session.restart(&mut rng), Err(GameError::NoBoardSize));
    }

    #[test]
    fn test_resume_from_ready_starts() {
        let mut session = dealt(&[1, 2, 1, 2]);
        assert_eq!(session.resume(), Some(GameEvent::Started));
        assert_eq!(session.resume(), None);
    }
}
