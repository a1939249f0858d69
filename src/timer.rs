//! Tokio-backed [`Clock`]: an interval task for ticks and one-shot sleeps
//! for mismatch settles, both reporting into an unbounded channel the host
//! loop drains.

use std::time::Duration;

use pairs_core::{Clock, SettleToken, TICK_PERIOD, TimerEpoch};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument, warn};

/// Timer output delivered to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// One second elapsed for the given timer epoch.
    Tick(TimerEpoch),
    /// A mismatch settle delay expired.
    Settle(SettleToken),
}

/// Clock driven by the tokio runtime.
///
/// Must be used from within a runtime; every request spawns a task.
#[derive(Debug)]
pub struct TokioClock {
    tx: UnboundedSender<ClockEvent>,
    ticker: Option<JoinHandle<()>>,
    stopping: Option<JoinHandle<()>>,
}

impl TokioClock {
    /// Creates an idle clock and the receiver its events arrive on.
    #[instrument]
    pub fn new() -> (Self, UnboundedReceiver<ClockEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = Self {
            tx,
            ticker: None,
            stopping: None,
        };
        (clock, rx)
    }

    /// Returns true while the tick task is running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Waits for the most recently stopped tick task to wind down.
    ///
    /// Bounded by one tick period. Stale ticks are already discarded by
    /// epoch, so this is only needed by hosts that want to observe a quiet
    /// channel after a pause.
    #[instrument(skip(self))]
    pub async fn settled(&mut self) {
        let Some(handle) = self.stopping.take() else {
            return;
        };
        match tokio::time::timeout(TICK_PERIOD, handle).await {
            Ok(Ok(())) => debug!("Tick task finished"),
            Ok(Err(e)) if e.is_cancelled() => debug!("Tick task cancelled"),
            Ok(Err(e)) => warn!(error = %e, "Tick task failed"),
            Err(_) => warn!("Tick task did not stop within one period"),
        }
    }
}

impl Clock for TokioClock {
    #[instrument(skip(self))]
    fn start_ticking(&mut self, epoch: TimerEpoch) {
        self.stop_ticking();
        let tx = self.tx.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(ClockEvent::Tick(epoch)).is_err() {
                    debug!("Clock receiver dropped, stopping ticks");
                    break;
                }
            }
        }));
        debug!(?epoch, "Tick task started");
    }

    #[instrument(skip(self))]
    fn stop_ticking(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            self.stopping = Some(handle);
            debug!("Tick task aborted");
        }
    }

    #[instrument(skip(self))]
    fn schedule_settle(&mut self, token: SettleToken, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ClockEvent::Settle(token)).is_err() {
                debug!(?token, "Clock receiver dropped before settle");
            }
        });
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::{BoardSize, Deck, GameEvent, GameSession, Phase, SETTLE_DELAY, SlotState};

    fn session(cards: &[u8]) -> (GameSession<TokioClock>, UnboundedReceiver<ClockEvent>) {
        let (clock, rx) = TokioClock::new();
        let mut session = GameSession::new(clock, "Ada");
        session.deal(Deck::from_cards(BoardSize::Two, cards).unwrap());
        (session, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (mut session, mut rx) = session(&[1, 2, 1, 2]);
        session.select_slot(0);
        assert!(session.clock().is_ticking());

        for expected in 1..=3 {
            let Some(ClockEvent::Tick(epoch)) = rx.recv().await else {
                panic!("expected tick");
            };
            assert_eq!(session.tick(epoch), Some(GameEvent::TimerTick(expected)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_survives_pause() {
        let (mut session, mut rx) = session(&[1, 2, 1, 2]);
        session.select_slot(0);
        session.select_slot(1);
        assert!(session.is_processing());
        assert_eq!(session.pause(), Some(GameEvent::Paused));
        session.clock_mut().settled().await;
        assert!(!session.clock().is_ticking());

        tokio::time::advance(SETTLE_DELAY).await;
        let token = loop {
            match rx.recv().await {
                Some(ClockEvent::Settle(token)) => break token,
                Some(ClockEvent::Tick(epoch)) => assert_eq!(session.tick(epoch), None),
                None => panic!("channel closed"),
            }
        };
        assert_eq!(session.complete_settle(token), Some(GameEvent::SettleComplete(0, 1)));
        assert_eq!(session.slot_state(0), Some(SlotState::FaceDown));
        assert_eq!(session.phase(), Phase::Paused);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_without_stop_returns() {
        let (mut clock, _rx) = TokioClock::new();
        clock.settled().await;
        assert!(!clock.is_ticking());
    }
}
