//! Standings calculation.
//!
//! Players are ranked by wins, most first. Ties are broken by ascending
//! player ID so that every store yields the same order.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::models::{Match, Player, PlayerId, StandingRow};

/// Ordering used for standings: wins descending, then player ID ascending
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.wins.cmp(&a.wins).then_with(|| a.id.cmp(&b.id))
}

/// Sort standings rows into rank order in place
pub fn rank_standings(rows: &mut [StandingRow]) {
    rows.sort_by(compare_rows);
}

/// Whether the rows are already in rank order
pub fn is_ranked(rows: &[StandingRow]) -> bool {
    rows.windows(2)
        .all(|w| compare_rows(&w[0], &w[1]) != Ordering::Greater)
}

/// Aggregate wins and losses for every player and return ranked standings.
///
/// Mirrors the `score` view: every player appears, zero-filled when they
/// have no matches. Matches referencing unknown players are ignored.
pub fn tally(players: &[Player], matches: &[Match]) -> Vec<StandingRow> {
    let mut records: HashMap<PlayerId, (i64, i64)> =
        players.iter().map(|p| (p.id, (0, 0))).collect();

    for m in matches {
        if let Some((wins, _)) = records.get_mut(&m.winner) {
            *wins += 1;
        }
        if let Some((_, losses)) = records.get_mut(&m.loser) {
            *losses += 1;
        }
    }

    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|p| {
            let (wins, losses) = records.get(&p.id).copied().unwrap_or_default();
            StandingRow::new(p.id, p.name.clone(), wins, wins + losses)
        })
        .collect();

    rank_standings(&mut rows);
    rows
}
