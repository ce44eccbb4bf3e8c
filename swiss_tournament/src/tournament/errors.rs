//! Tournament error types.

use std::time::Duration;

use thiserror::Error;

use super::models::PlayerId;
use crate::db::timeouts::TimeoutError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Database error (store unreachable, malformed statement, ...)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Statement did not finish in time
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Player ID does not reference a registered player
    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    /// Winner and loser are the same player
    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    /// Player name rejected at registration
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// Pairing requires an even number of players
    #[error("Cannot pair an odd number of players ({0})")]
    OddPlayerCount(usize),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors are sanitized to prevent information disclosure about
    /// the internal schema.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Tournament store error".to_string(),
            TournamentError::Timeout(_) => "Tournament store is not responding".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<TimeoutError> for TournamentError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(duration) => TournamentError::Timeout(duration),
            TimeoutError::Database(e) => TournamentError::Database(e),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
