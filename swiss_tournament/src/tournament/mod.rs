//! Swiss-system tournament: registration, match reporting, standings and pairings.
//!
//! This module provides:
//! - Player registration and bulk reset
//! - Match result recording with referential checks
//! - Standings ranked by wins (ties broken by player ID)
//! - Next-round pairings of adjacent standings
//!
//! ## Example
//!
//! ```no_run
//! use swiss_tournament::db::{Database, DatabaseConfig};
//! use swiss_tournament::tournament::TournamentManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let tournament = TournamentManager::new(Arc::new(db.repository()));
//!
//!     let alice = tournament.register_player("Alice").await?;
//!     let bob = tournament.register_player("Bob").await?;
//!     tournament.report_match(alice, bob).await?;
//!
//!     for pairing in tournament.swiss_pairings().await? {
//!         println!("{}", pairing);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;
pub mod standings;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{MAX_NAME_LEN, Match, Pairing, Player, PlayerId, StandingRow};
pub use pairing::swiss_pairings;
pub use standings::{rank_standings, tally};
