//! Tournament schema: the `players` and `matches` relations and the `score` view.
//!
//! The standings query reads `score(id, name, wins, loses)` directly, so the
//! view's column names and types are part of the storage contract.

use sqlx::PgPool;

use super::timeouts::{SCHEMA_TIMEOUT, TimeoutResult, with_timeout};

const CREATE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id SERIAL PRIMARY KEY,
        winner INTEGER NOT NULL REFERENCES players (id) ON DELETE CASCADE,
        loser INTEGER NOT NULL REFERENCES players (id) ON DELETE CASCADE,
        CONSTRAINT matches_distinct_players CHECK (winner <> loser)
    )
    "#,
    r#"
    CREATE OR REPLACE VIEW score AS
    SELECT p.id,
           p.name,
           COALESCE(w.wins, 0)::BIGINT AS wins,
           COALESCE(l.loses, 0)::BIGINT AS loses
    FROM players p
    LEFT JOIN (SELECT winner AS id, COUNT(*) AS wins FROM matches GROUP BY winner) w
           ON w.id = p.id
    LEFT JOIN (SELECT loser AS id, COUNT(*) AS loses FROM matches GROUP BY loser) l
           ON l.id = p.id
    "#,
];

const DROP_STATEMENTS: &[&str] = &[
    "DROP VIEW IF EXISTS score",
    "DROP TABLE IF EXISTS matches",
    "DROP TABLE IF EXISTS players",
];

/// Name of the foreign key from `matches.winner` to `players.id`
pub const WINNER_FOREIGN_KEY: &str = "matches_winner_fkey";

/// Name of the foreign key from `matches.loser` to `players.id`
pub const LOSER_FOREIGN_KEY: &str = "matches_loser_fkey";

/// Name of the check constraint rejecting self-matches
pub const DISTINCT_PLAYERS_CHECK: &str = "matches_distinct_players";

/// Create the tables and view if they do not exist yet.
///
/// Runs in a single transaction; safe to call repeatedly.
pub async fn provision(pool: &PgPool) -> TimeoutResult<()> {
    run_in_transaction(pool, CREATE_STATEMENTS).await?;
    log::info!("Tournament schema provisioned");
    Ok(())
}

/// Drop the view and both tables, discarding all tournament data
pub async fn drop_all(pool: &PgPool) -> TimeoutResult<()> {
    run_in_transaction(pool, DROP_STATEMENTS).await?;
    log::warn!("Tournament schema dropped");
    Ok(())
}

async fn run_in_transaction(pool: &PgPool, statements: &[&str]) -> TimeoutResult<()> {
    with_timeout(SCHEMA_TIMEOUT, async {
        let mut tx = pool.begin().await?;
        for &statement in statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    })
    .await
}
