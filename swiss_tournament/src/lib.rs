//! # Swiss Tournament
//!
//! A Swiss-system tournament manager backed by PostgreSQL.
//!
//! Players register, match results are reported, and each round is paired
//! from the current standings: the two leaders play each other, then the
//! next two, and so on down the table.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Models, standings calculation, pairing generation and
//!   the [`TournamentManager`] facade
//! - [`db`]: Connection pool, schema provisioning and the repository seam
//!   over the store
//! - [`display`]: Text rendering of standings and pairings
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::{StandingRow, swiss_pairings};
//!
//! let standings = vec![
//!     StandingRow::new(1, "Alice", 1, 1),
//!     StandingRow::new(3, "Carol", 1, 1),
//!     StandingRow::new(2, "Bob", 0, 1),
//!     StandingRow::new(4, "Dave", 0, 1),
//! ];
//!
//! let pairings = swiss_pairings(&standings).unwrap();
//! assert_eq!((pairings[0].id1, pairings[0].id2), (1, 3));
//! assert_eq!((pairings[1].id1, pairings[1].id2), (2, 4));
//! ```

/// Database connection pool, schema and repositories.
pub mod db;

/// Rendering helpers for people-facing output.
pub mod display;

/// Tournament models and logic.
pub mod tournament;
pub use tournament::{
    Match, Pairing, Player, PlayerId, StandingRow, TournamentError, TournamentManager,
    TournamentResult, swiss_pairings,
};
