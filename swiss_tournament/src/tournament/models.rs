//! Tournament data models: players, match results, standings and pairings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player ID type (assigned by the store)
pub type PlayerId = i32;

/// Maximum length of a player name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// Registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID
    pub id: PlayerId,
    /// Full name as registered (need not be unique)
    pub name: String,
}

/// Recorded match outcome. Draws are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// ID of the player who won
    pub winner: PlayerId,
    /// ID of the player who lost
    pub loser: PlayerId,
}

impl Match {
    /// Create a new match record
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self { winner, loser }
    }

    /// Whether the given player took part in this match
    pub fn involves(&self, player: PlayerId) -> bool {
        self.winner == player || self.loser == player
    }
}

/// One row of the standings table.
///
/// Derived from the match records on every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    /// Player ID
    pub id: PlayerId,
    /// Player name
    pub name: String,
    /// Number of matches won
    pub wins: i64,
    /// Number of matches played (wins + losses)
    pub matches: i64,
}

impl StandingRow {
    /// Create a standings row for a player
    pub fn new(id: PlayerId, name: impl Into<String>, wins: i64, matches: i64) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches,
        }
    }

    /// Number of matches lost
    pub fn losses(&self) -> i64 {
        self.matches - self.wins
    }
}

/// Head-to-head assignment for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Higher-ranked player's ID
    pub id1: PlayerId,
    /// Higher-ranked player's name
    pub name1: String,
    /// Lower-ranked player's ID
    pub id2: PlayerId,
    /// Lower-ranked player's name
    pub name2: String,
}

impl Pairing {
    /// Pair two adjacent standings rows, keeping their rank order
    pub fn new(first: &StandingRow, second: &StandingRow) -> Self {
        Self {
            id1: first.id,
            name1: first.name.clone(),
            id2: second.id,
            name2: second.name.clone(),
        }
    }

    /// Whether the given player is part of this pairing
    pub fn contains(&self, player: PlayerId) -> bool {
        self.id1 == player || self.id2 == player
    }

    /// Tuple form `(id1, name1, id2, name2)`
    pub fn into_tuple(self) -> (PlayerId, String, PlayerId, String) {
        (self.id1, self.name1, self.id2, self.name2)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({})",
            self.name1, self.id1, self.name2, self.id2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_row_losses() {
        let row = StandingRow::new(1, "Ada", 3, 5);
        assert_eq!(row.losses(), 2);

        let fresh = StandingRow::new(2, "Grace", 0, 0);
        assert_eq!(fresh.losses(), 0);
    }

    #[test]
    fn test_match_involves() {
        let m = Match::new(4, 7);
        assert!(m.involves(4));
        assert!(m.involves(7));
        assert!(!m.involves(5));
    }

    #[test]
    fn test_pairing_keeps_rank_order() {
        let first = StandingRow::new(10, "Alice", 2, 2);
        let second = StandingRow::new(3, "Bob", 2, 2);
        let pairing = Pairing::new(&first, &second);

        assert_eq!(pairing.id1, 10);
        assert_eq!(pairing.id2, 3);
        assert!(pairing.contains(3));
        assert!(!pairing.contains(4));
        assert_eq!(
            pairing.into_tuple(),
            (10, "Alice".to_string(), 3, "Bob".to_string())
        );
    }

    #[test]
    fn test_pairing_display() {
        let pairing = Pairing::new(
            &StandingRow::new(1, "Alice", 0, 0),
            &StandingRow::new(2, "Bob", 0, 0),
        );
        assert_eq!(pairing.to_string(), "Alice (1) vs Bob (2)");
    }
}
