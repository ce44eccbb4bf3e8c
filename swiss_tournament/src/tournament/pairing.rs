//! Swiss pairing generation.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Pairing, StandingRow};

/// Pair players for the next round.
///
/// Partitions the ranked standings into consecutive pairs: rank 1 plays
/// rank 2, rank 3 plays rank 4, and so on. Each player appears in exactly
/// one pairing. Byes are not supported, so an odd number of players is
/// rejected instead of leaving the last player out.
///
/// # Errors
///
/// Returns [`TournamentError::OddPlayerCount`] when `standings` has odd length.
pub fn swiss_pairings(standings: &[StandingRow]) -> TournamentResult<Vec<Pairing>> {
    if standings.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(standings.len()));
    }

    Ok(standings
        .chunks_exact(2)
        .map(|pair| Pairing::new(&pair[0], &pair[1]))
        .collect())
}
