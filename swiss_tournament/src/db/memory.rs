//! In-memory `TournamentRepository`.
//!
//! Behaves like the PostgreSQL schema: IDs come from a sequence that is never
//! reset, deleting players cascades to their matches, and match inserts
//! enforce the foreign keys and the distinct-players check.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::repository::TournamentRepository;
use crate::tournament::{
    Match, Player, PlayerId, StandingRow, TournamentError, TournamentResult, tally,
};

#[derive(Debug)]
struct MemoryState {
    players: Vec<Player>,
    matches: Vec<Match>,
    next_id: PlayerId,
}

/// In-memory tournament store
#[derive(Debug)]
pub struct InMemoryRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                players: Vec::new(),
                matches: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Snapshot of all recorded matches, in insertion order
    pub async fn matches(&self) -> Vec<Match> {
        self.state.lock().await.matches.clone()
    }
}

#[async_trait]
impl TournamentRepository for InMemoryRepository {
    async fn delete_matches(&self) -> TournamentResult<u64> {
        let mut state = self.state.lock().await;
        let removed = state.matches.len() as u64;
        state.matches.clear();
        Ok(removed)
    }

    async fn delete_players(&self) -> TournamentResult<u64> {
        let mut state = self.state.lock().await;
        let removed = state.players.len() as u64;
        state.players.clear();
        state.matches.clear();
        Ok(removed)
    }

    async fn count_players(&self) -> TournamentResult<i64> {
        Ok(self.state.lock().await.players.len() as i64)
    }

    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state.players.push(Player {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn player_exists(&self, id: PlayerId) -> TournamentResult<bool> {
        Ok(self.state.lock().await.players.iter().any(|p| p.id == id))
    }

    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        let mut state = self.state.lock().await;
        if winner == loser {
            return Err(TournamentError::SelfMatch(winner));
        }
        for id in [winner, loser] {
            if !state.players.iter().any(|p| p.id == id) {
                return Err(TournamentError::UnknownPlayer(id));
            }
        }
        state.matches.push(Match::new(winner, loser));
        Ok(())
    }

    async fn fetch_standings(&self) -> TournamentResult<Vec<StandingRow>> {
        let state = self.state.lock().await;
        Ok(tally(&state.players, &state.matches))
    }
}
