//! Clock collaborator: the per-second timer and the mismatch settle delay.
//!
//! The session never sleeps or spawns. It asks the clock to start or stop
//! ticking and to schedule settle completions; the host feeds the resulting
//! ticks and completions back through [`GameSession::tick`] and
//! [`GameSession::complete_settle`].
//!
//! [`GameSession::tick`]: crate::GameSession::tick
//! [`GameSession::complete_settle`]: crate::GameSession::complete_settle

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::card::SlotIndex;

/// Interval between timer ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// How long mismatched cards stay face-up before flipping back.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Identifies one run of the timer.
///
/// Every start and every stop moves to a new epoch. A tick carrying an
/// older epoch was issued before a pause or restart and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    /// Returns the following epoch.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Handle for a scheduled mismatch settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SettleToken {
    generation: u64,
    first: SlotIndex,
    second: SlotIndex,
}

impl SettleToken {
    pub(crate) fn new(generation: u64, first: SlotIndex, second: SlotIndex) -> Self {
        Self {
            generation,
            first,
            second,
        }
    }
}

/// Timer source the session drives.
pub trait Clock {
    /// Starts delivering one tick per [`TICK_PERIOD`], tagged with `epoch`.
    fn start_ticking(&mut self, epoch: TimerEpoch);

    /// Stops delivering ticks.
    fn stop_ticking(&mut self);

    /// Delivers `token` back to the session once after `delay`.
    ///
    /// Must not be cancelled by [`Clock::stop_ticking`].
    fn schedule_settle(&mut self, token: SettleToken, delay: Duration);
}

/// Clock that only records requests.
///
/// Tests and headless hosts advance time by hand: they read the current
/// epoch from [`ManualClock::ticking`] and drain scheduled settles with
/// [`ManualClock::take_settles`].
#[derive(Debug, Clone, Default, Getters)]
pub struct ManualClock {
    /// Epoch of the running timer, if any.
    ticking: Option<TimerEpoch>,
    /// Settles scheduled and not yet taken.
    pending_settles: Vec<SettleToken>,
    /// Number of stop requests received.
    stops: usize,
}

impl ManualClock {
    /// Creates an idle clock.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all scheduled settles.
    #[instrument(skip(self))]
    pub fn take_settles(&mut self) -> Vec<SettleToken> {
        std::mem::take(&mut self.pending_settles)
    }
}

impl Clock for ManualClock {
    fn start_ticking(&mut self, epoch: TimerEpoch) {
        debug!(?epoch, "Manual clock started");
        self.ticking = Some(epoch);
    }

    fn stop_ticking(&mut self) {
        debug!("Manual clock stopped");
        self.ticking = None;
        self.stops += 1;
    }

    fn schedule_settle(&mut self, token: SettleToken, delay: Duration) {
        debug!(?token, ?delay, "Manual clock scheduled settle");
        self.pending_settles.push(token);
    }
}
