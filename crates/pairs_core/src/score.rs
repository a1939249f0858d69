//! Best-time records and high-score evaluation.

use std::collections::HashMap;
use std::convert::Infallible;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::{BoardSize, GameEvent};

/// Best time recorded for a board size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct BestScore {
    seconds: u64,
    player_name: String,
}

impl BestScore {
    /// Returns true if `seconds` is a strict improvement on this record.
    pub fn is_beaten_by(&self, seconds: u64) -> bool {
        seconds < self.seconds
    }
}

/// Durable best-time storage, keyed by board size.
///
/// Last writer wins; there is a single writer per process.
pub trait ScoreStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the record for a board size, if any.
    fn get(&self, size: BoardSize) -> Result<Option<BestScore>, Self::Error>;

    /// Replaces the record for a board size.
    fn set(&mut self, size: BoardSize, score: BestScore) -> Result<(), Self::Error>;
}

/// In-memory score store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<BoardSize, BestScore>,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    type Error = Infallible;

    fn get(&self, size: BoardSize) -> Result<Option<BestScore>, Self::Error> {
        Ok(self.scores.get(&size).cloned())
    }

    fn set(&mut self, size: BoardSize, score: BestScore) -> Result<(), Self::Error> {
        self.scores.insert(size, score);
        Ok(())
    }
}

/// One row of the best-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct ScoreRow {
    board_size: BoardSize,
    best: Option<BestScore>,
}

/// High-score evaluation over a [`ScoreStore`].
#[derive(Debug, Clone)]
pub struct HighScores<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> HighScores<S> {
    /// Wraps a store.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submits a finished game's time.
    ///
    /// Stores it and returns [`GameEvent::NewHighScore`] when there is no
    /// record yet or the time is strictly lower. An equal time keeps the
    /// existing record.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn submit(
        &mut self,
        size: BoardSize,
        seconds: u64,
        player_name: &str,
    ) -> Result<Option<GameEvent>, S::Error> {
        if let Some(best) = self.store.get(size)?
            && !best.is_beaten_by(seconds)
        {
            debug!(best = best.seconds(), "Not a new high score");
            return Ok(None);
        }

        self.store
            .set(size, BestScore::new(seconds, player_name.to_string()))?;
        info!(%size, seconds, player = player_name, "New high score");
        Ok(Some(GameEvent::NewHighScore {
            seconds,
            player_name: player_name.to_string(),
        }))
    }

    /// Returns the record for one board size.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn best(&self, size: BoardSize) -> Result<Option<BestScore>, S::Error> {
        self.store.get(size)
    }

    /// Returns one row per board size, smallest first.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn table(&self) -> Result<Vec<ScoreRow>, S::Error> {
        BoardSize::iter()
            .map(|size| Ok(ScoreRow::new(size, self.store.get(size)?)))
            .collect()
    }
}
