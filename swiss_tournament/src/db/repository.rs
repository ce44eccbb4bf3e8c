//! Repository trait for tournament persistence.
//!
//! The tournament logic talks to storage only through [`TournamentRepository`],
//! so it can run against PostgreSQL or the in-memory store used in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::schema::{DISTINCT_PLAYERS_CHECK, LOSER_FOREIGN_KEY, WINNER_FOREIGN_KEY};
use super::timeouts::{DEFAULT_QUERY_TIMEOUT, TimeoutError, timed_query};
use crate::tournament::{PlayerId, StandingRow, TournamentError, TournamentResult};

/// Trait for player/match persistence operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Delete every match record, returning how many were removed
    async fn delete_matches(&self) -> TournamentResult<u64>;

    /// Delete every player (and their matches), returning how many players were removed
    async fn delete_players(&self) -> TournamentResult<u64>;

    /// Count registered players
    async fn count_players(&self) -> TournamentResult<i64>;

    /// Insert a player and return the store-assigned ID
    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId>;

    /// Whether a player with this ID exists
    async fn player_exists(&self, id: PlayerId) -> TournamentResult<bool>;

    /// Insert one match record
    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()>;

    /// Aggregated standings for every player, ranked by wins
    async fn fetch_standings(&self) -> TournamentResult<Vec<StandingRow>>;
}

/// PostgreSQL implementation of `TournamentRepository`
pub struct PgTournamentRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgTournamentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-statement timeout
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Per-statement timeout
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    fn standing_from_row(row: &PgRow) -> sqlx::Result<StandingRow> {
        Ok(StandingRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            wins: row.try_get("wins")?,
            matches: row.try_get("matches")?,
        })
    }
}

/// Domain error for a violated `matches` constraint, if the constraint is ours
fn constraint_error(
    constraint: Option<&str>,
    winner: PlayerId,
    loser: PlayerId,
) -> Option<TournamentError> {
    match constraint? {
        WINNER_FOREIGN_KEY => Some(TournamentError::UnknownPlayer(winner)),
        LOSER_FOREIGN_KEY => Some(TournamentError::UnknownPlayer(loser)),
        DISTINCT_PLAYERS_CHECK => Some(TournamentError::SelfMatch(winner)),
        _ => None,
    }
}

/// Translate constraint violations on `matches` into domain errors
fn map_match_insert_error(
    err: TimeoutError,
    winner: PlayerId,
    loser: PlayerId,
) -> TournamentError {
    if let TimeoutError::Database(sqlx::Error::Database(db_err)) = &err {
        if let Some(mapped) = constraint_error(db_err.constraint(), winner, loser) {
            return mapped;
        }
    }
    err.into()
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn delete_matches(&self) -> TournamentResult<u64> {
        let result = timed_query(
            self.query_timeout,
            "DELETE",
            "matches",
            sqlx::query("DELETE FROM matches").execute(self.pool.as_ref()),
        )
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_players(&self) -> TournamentResult<u64> {
        let result = timed_query(
            self.query_timeout,
            "DELETE",
            "players",
            sqlx::query("DELETE FROM players").execute(self.pool.as_ref()),
        )
        .await?;
        Ok(result.rows_affected())
    }

    async fn count_players(&self) -> TournamentResult<i64> {
        let count = timed_query(
            self.query_timeout,
            "SELECT",
            "players",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM players")
                .fetch_one(self.pool.as_ref()),
        )
        .await?;
        Ok(count)
    }

    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let row = timed_query(
            self.query_timeout,
            "INSERT",
            "players",
            sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(self.pool.as_ref()),
        )
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn player_exists(&self, id: PlayerId) -> TournamentResult<bool> {
        let exists = timed_query(
            self.query_timeout,
            "SELECT",
            "players",
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM players WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref()),
        )
        .await?;
        Ok(exists)
    }

    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        timed_query(
            self.query_timeout,
            "INSERT",
            "matches",
            sqlx::query("INSERT INTO matches (winner, loser) VALUES ($1, $2)")
                .bind(winner)
                .bind(loser)
                .execute(self.pool.as_ref()),
        )
        .await
        .map_err(|e| map_match_insert_error(e, winner, loser))?;
        Ok(())
    }

    async fn fetch_standings(&self) -> TournamentResult<Vec<StandingRow>> {
        let rows = timed_query(
            self.query_timeout,
            "SELECT",
            "score",
            sqlx::query(
                r#"
                SELECT id, name, wins, wins + loses AS matches
                FROM score
                ORDER BY wins DESC, id ASC
                "#,
            )
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        let standings = rows
            .iter()
            .map(Self::standing_from_row)
            .collect::<sqlx::Result<Vec<_>>>()?;
        Ok(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_map_to_the_missing_player() {
        assert!(matches!(
            constraint_error(Some(WINNER_FOREIGN_KEY), 3, 8),
            Some(TournamentError::UnknownPlayer(3))
        ));
        assert!(matches!(
            constraint_error(Some(LOSER_FOREIGN_KEY), 3, 8),
            Some(TournamentError::UnknownPlayer(8))
        ));
    }

    #[test]
    fn test_distinct_players_check_maps_to_self_match() {
        assert!(matches!(
            constraint_error(Some(DISTINCT_PLAYERS_CHECK), 5, 5),
            Some(TournamentError::SelfMatch(5))
        ));
    }

    #[test]
    fn test_unrelated_constraints_are_not_mapped() {
        assert!(constraint_error(Some("players_pkey"), 1, 2).is_none());
        assert!(constraint_error(None, 1, 2).is_none());
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = map_match_insert_error(TimeoutError::Database(sqlx::Error::RowNotFound), 1, 2);
        assert!(matches!(err, TournamentError::Database(_)));

        let limit = Duration::from_millis(10);
        let err = map_match_insert_error(TimeoutError::Timeout(limit), 1, 2);
        assert!(matches!(err, TournamentError::Timeout(d) if d == limit));
    }
}
