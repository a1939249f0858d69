//! Database models for best-score records.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use pairs_core::{BestScore, BoardSize};
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

/// Best-score row as stored.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::best_scores)]
pub struct BestScoreRecord {
    board_size: i32,
    seconds: i64,
    player_name: String,
    updated_at: NaiveDateTime,
}

impl BestScoreRecord {
    /// Parses the stored board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the column holds an unsupported size.
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn parse_board_size(&self) -> Result<BoardSize, DbError> {
        let raw = u8::try_from(self.board_size)
            .map_err(|_| DbError::new(
                DbErrorKind::CorruptRecord,
                format!("Board size out of range: {}", self.board_size),
            ))?;
        Ok(BoardSize::try_from(raw)?)
    }

    /// Converts the row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored time is negative.
    #[instrument(skip(self), fields(seconds = self.seconds))]
    pub fn to_best_score(&self) -> Result<BestScore, DbError> {
        let seconds = u64::try_from(self.seconds)
            .map_err(|_| DbError::new(
                DbErrorKind::CorruptRecord,
                format!("Negative best time: {}", self.seconds),
            ))?;
        Ok(BestScore::new(seconds, self.player_name.clone()))
    }
}

/// Insertable best-score row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::best_scores)]
pub struct NewBestScore {
    board_size: i32,
    seconds: i64,
    player_name: String,
}

impl NewBestScore {
    /// Builds a row from a domain record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the time does not fit the column.
    pub fn from_best(size: BoardSize, score: &BestScore) -> Result<Self, DbError> {
        let seconds = i64::try_from(*score.seconds())
            .map_err(|_| DbError::new(
                DbErrorKind::Query,
                format!("Best time too large: {}", score.seconds()),
            ))?;
        Ok(Self::new(
            i32::from(u8::from(size)),
            seconds,
            score.player_name().clone(),
        ))
    }
}
