//! Database repository for best scores.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use pairs_core::{BestScore, BoardSize, ScoreStore};
use tracing::{debug, info, instrument, warn};

use crate::db::{BestScoreRecord, DbError, DbErrorKind, MIGRATIONS, NewBestScore, schema};

/// SQLite-backed best-score repository.
///
/// Opens a connection per call; the game writes at most once per finished
/// round.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Creates a repository for the database at the given path and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn new(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let repo = Self {
            db_path: db_path.as_ref().to_string(),
        };
        info!(path = %repo.db_path, "Creating ScoreRepository");
        repo.migrate()?;
        Ok(repo)
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to open '{}': {}", self.db_path, e),
                )
            })
    }

    /// Gets the best score for a board size. Returns `None` if none is stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row is corrupt.
    #[instrument(skip(self))]
    pub fn get_best(&self, size: BoardSize) -> Result<Option<BestScore>, DbError> {
        let mut conn = self.connection()?;
        let record = schema::best_scores::table
            .find(i32::from(u8::from(size)))
            .select(BestScoreRecord::as_select())
            .first(&mut conn)
            .optional()?;

        match record {
            Some(r) => {
                debug!(seconds = r.seconds(), player = %r.player_name(), "Best score found");
                Ok(Some(r.to_best_score()?))
            }
            None => {
                debug!("No best score stored");
                Ok(None)
            }
        }
    }

    /// Inserts or replaces the best score for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, score), fields(seconds = score.seconds(), player = %score.player_name()))]
    pub fn upsert_best(&self, size: BoardSize, score: &BestScore) -> Result<(), DbError> {
        let row = NewBestScore::from_best(size, score)?;
        let mut conn = self.connection()?;
        diesel::replace_into(schema::best_scores::table)
            .values(&row)
            .execute(&mut conn)?;
        info!(%size, "Best score stored");
        Ok(())
    }

    /// Lists every stored record, smallest board first. Corrupt rows are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_best(&self) -> Result<Vec<(BoardSize, BestScore)>, DbError> {
        let mut conn = self.connection()?;
        let records = schema::best_scores::table
            .order(schema::best_scores::board_size.asc())
            .select(BestScoreRecord::as_select())
            .load(&mut conn)?;

        let scores = records
            .iter()
            .filter_map(|r| match (r.parse_board_size(), r.to_best_score()) {
                (Ok(size), Ok(score)) => Some((size, score)),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, "Skipping corrupt best-score row");
                    None
                }
            })
            .collect::<Vec<_>>();
        info!(count = scores.len(), "Best scores loaded");
        Ok(scores)
    }

    /// Deletes every stored record and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::best_scores::table).execute(&mut conn)?;
        info!(removed, "Best scores cleared");
        Ok(removed)
    }
}

impl ScoreStore for ScoreRepository {
    type Error = DbError;

    fn get(&self, size: BoardSize) -> Result<Option<BestScore>, Self::Error> {
        self.get_best(size)
    }

    fn set(&mut self, size: BoardSize, score: BestScore) -> Result<(), Self::Error> {
        self.upsert_best(size, &score)
    }
}
