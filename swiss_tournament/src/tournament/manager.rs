//! Tournament manager exposing registration, reporting, standings and pairings.

use std::sync::Arc;

use super::errors::{TournamentError, TournamentResult};
use super::models::{MAX_NAME_LEN, Pairing, PlayerId, StandingRow};
use super::pairing::swiss_pairings;
use super::standings::rank_standings;
use crate::db::repository::TournamentRepository;

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    repo: Arc<dyn TournamentRepository>,
}

impl TournamentManager {
    /// Create a tournament manager over any repository
    ///
    /// For PostgreSQL pass [`crate::db::Database::repository`], which carries
    /// the configured query timeout.
    pub fn new(repo: Arc<dyn TournamentRepository>) -> Self {
        Self { repo }
    }

    /// Remove all match records. Returns the number of matches removed.
    pub async fn delete_matches(&self) -> TournamentResult<u64> {
        let removed = self.repo.delete_matches().await?;
        log::info!("Deleted {} match record(s)", removed);
        Ok(removed)
    }

    /// Remove all players, and with them their matches.
    /// Returns the number of players removed.
    pub async fn delete_players(&self) -> TournamentResult<u64> {
        let removed = self.repo.delete_players().await?;
        log::info!("Deleted {} player(s)", removed);
        Ok(removed)
    }

    /// Number of players currently registered
    pub async fn count_players(&self) -> TournamentResult<i64> {
        self.repo.count_players().await
    }

    /// Register a player and return the ID assigned by the store.
    ///
    /// The name is trimmed and must be non-empty and at most
    /// [`MAX_NAME_LEN`] characters. It is otherwise stored as given; markup
    /// handling belongs to whoever renders it (see [`crate::display`]).
    pub async fn register_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let name = validate_name(name)?;
        let id = self.repo.create_player(name).await?;
        log::info!("Registered player {} '{}'", id, name);
        Ok(id)
    }

    /// Record the outcome of a single match.
    ///
    /// # Errors
    ///
    /// * [`TournamentError::SelfMatch`] if `winner == loser`
    /// * [`TournamentError::UnknownPlayer`] if either ID is not registered
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        if winner == loser {
            return Err(TournamentError::SelfMatch(winner));
        }

        for id in [winner, loser] {
            if !self.repo.player_exists(id).await? {
                return Err(TournamentError::UnknownPlayer(id));
            }
        }

        self.repo.create_match(winner, loser).await?;
        log::debug!("Recorded match: {} beat {}", winner, loser);
        Ok(())
    }

    /// Current standings, most wins first, ties by ascending player ID
    pub async fn player_standings(&self) -> TournamentResult<Vec<StandingRow>> {
        let mut rows = self.repo.fetch_standings().await?;
        rank_standings(&mut rows);
        Ok(rows)
    }

    /// Pairings for the next round, built from a fresh standings snapshot
    pub async fn swiss_pairings(&self) -> TournamentResult<Vec<Pairing>> {
        let standings = self.player_standings().await?;
        let pairings = swiss_pairings(&standings)?;
        log::debug!(
            "Generated {} pairing(s) for {} player(s)",
            pairings.len(),
            standings.len()
        );
        Ok(pairings)
    }
}

/// Validate a player name, returning the trimmed form
fn validate_name(name: &str) -> TournamentResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidName(
            "Name must not be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(TournamentError::InvalidName(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    Ok(trimmed)
}
