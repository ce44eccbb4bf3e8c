//! Integration tests for the tournament lifecycle
//!
//! These tests drive `TournamentManager` end to end against the in-memory
//! store: registration, resets, match reporting, standings and pairings.

use std::collections::HashSet;
use std::sync::Arc;

use swiss_tournament::db::InMemoryRepository;
use swiss_tournament::{PlayerId, StandingRow, TournamentError, TournamentManager};

/// Helper to create a manager over a fresh in-memory store
fn setup_manager() -> TournamentManager {
    TournamentManager::new(Arc::new(InMemoryRepository::new()))
}

/// Helper to register players and return their IDs in registration order
async fn register_all(mgr: &TournamentManager, names: &[&str]) -> Vec<PlayerId> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        ids.push(mgr.register_player(name).await.expect("registration failed"));
    }
    ids
}

fn standing_for(standings: &[StandingRow], id: PlayerId) -> &StandingRow {
    standings
        .iter()
        .find(|row| row.id == id)
        .expect("player missing from standings")
}

#[tokio::test]
async fn test_count_after_delete() {
    let mgr = setup_manager();
    mgr.delete_matches().await.unwrap();
    mgr.delete_players().await.unwrap();

    assert_eq!(mgr.count_players().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_counts_players() {
    let mgr = setup_manager();

    mgr.register_player("Chandra Nalaar").await.unwrap();
    assert_eq!(mgr.count_players().await.unwrap(), 1);

    register_all(
        &mgr,
        &["Markov Chaney", "Joe Malik", "Mao Tsu-hsi", "Atlanta Hope"],
    )
    .await;
    assert_eq!(mgr.count_players().await.unwrap(), 5);

    mgr.delete_players().await.unwrap();
    assert_eq!(mgr.count_players().await.unwrap(), 0);

    // Counting restarts from the last reset
    mgr.register_player("Diane Grant").await.unwrap();
    assert_eq!(mgr.count_players().await.unwrap(), 1);
}

#[tokio::test]
async fn test_standings_before_matches() {
    let mgr = setup_manager();
    let ids = register_all(&mgr, &["Melpomene Murray", "Randy Schwartz"]).await;

    let standings = mgr.player_standings().await.unwrap();
    assert_eq!(standings.len(), 2, "Players should appear before playing");

    for row in &standings {
        assert_eq!(row.wins, 0);
        assert_eq!(row.matches, 0);
    }

    let names: HashSet<&str> = standings.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["Melpomene Murray", "Randy Schwartz"]));
    assert_eq!(standings[0].id, ids[0], "Ties are ordered by player ID");
}

#[tokio::test]
async fn test_report_matches() {
    let mgr = setup_manager();
    let ids = register_all(
        &mgr,
        &["Bruno Walton", "Boots O'Neal", "Cathy Burton", "Diane Grant"],
    )
    .await;

    mgr.report_match(ids[0], ids[1]).await.unwrap();
    mgr.report_match(ids[2], ids[3]).await.unwrap();

    let standings = mgr.player_standings().await.unwrap();
    for row in &standings {
        assert_eq!(row.matches, 1, "Each player should have one match recorded");
        if row.id == ids[0] || row.id == ids[2] {
            assert_eq!(row.wins, 1, "Each match winner should have one win");
        } else {
            assert_eq!(row.wins, 0, "Each match loser should have zero wins");
        }
    }
}

#[tokio::test]
async fn test_delete_matches_resets_records() {
    let mgr = setup_manager();
    let ids = register_all(&mgr, &["A", "B", "C", "D"]).await;
    mgr.report_match(ids[0], ids[1]).await.unwrap();
    mgr.report_match(ids[2], ids[3]).await.unwrap();

    assert_eq!(mgr.delete_matches().await.unwrap(), 2);

    let standings = mgr.player_standings().await.unwrap();
    assert_eq!(standings.len(), 4, "Players survive a match reset");
    assert!(standings.iter().all(|r| r.wins == 0 && r.matches == 0));
}

#[tokio::test]
async fn test_report_match_round_trip() {
    let mgr = setup_manager();
    let ids = register_all(&mgr, &["A", "B", "C", "D"]).await;
    mgr.report_match(ids[0], ids[1]).await.unwrap();

    let before = mgr.player_standings().await.unwrap();
    mgr.report_match(ids[2], ids[0]).await.unwrap();
    let after = mgr.player_standings().await.unwrap();

    let winner_before = standing_for(&before, ids[2]);
    let winner_after = standing_for(&after, ids[2]);
    assert_eq!(winner_after.wins, winner_before.wins + 1);
    assert_eq!(winner_after.matches, winner_before.matches + 1);

    let loser_before = standing_for(&before, ids[0]);
    let loser_after = standing_for(&after, ids[0]);
    assert_eq!(loser_after.wins, loser_before.wins);
    assert_eq!(loser_after.matches, loser_before.matches + 1);

    let untouched = standing_for(&after, ids[3]);
    assert_eq!(untouched, standing_for(&before, ids[3]));
}

#[tokio::test]
async fn test_pairings_after_first_round() {
    let mgr = setup_manager();
    let ids = register_all(
        &mgr,
        &["Twilight Sparkle", "Fluttershy", "Applejack", "Pinkie Pie"],
    )
    .await;
    let (p1, p2, p3, p4) = (ids[0], ids[1], ids[2], ids[3]);

    mgr.report_match(p1, p2).await.unwrap();
    mgr.report_match(p3, p4).await.unwrap();

    let standings = mgr.player_standings().await.unwrap();
    let order: Vec<PlayerId> = standings.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![p1, p3, p2, p4]);

    let pairings = mgr.swiss_pairings().await.unwrap();
    assert_eq!(pairings.len(), 2, "Four players should make two pairs");

    let pairs: Vec<(PlayerId, PlayerId)> = pairings.iter().map(|p| (p.id1, p.id2)).collect();
    assert_eq!(
        pairs,
        vec![(p1, p3), (p2, p4)],
        "Players with one win should be paired"
    );
    assert_eq!(pairings[0].name1, "Twilight Sparkle");
    assert_eq!(pairings[0].name2, "Applejack");
}

#[tokio::test]
async fn test_pairings_cover_every_player_once() {
    let mgr = setup_manager();
    let names: Vec<String> = (1..=8).map(|i| format!("Player {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let ids = register_all(&mgr, &refs).await;

    for pair in ids.chunks(2) {
        mgr.report_match(pair[1], pair[0]).await.unwrap();
    }

    let pairings = mgr.swiss_pairings().await.unwrap();
    assert_eq!(pairings.len(), 4);

    let mut seen = HashSet::new();
    for pairing in &pairings {
        assert!(seen.insert(pairing.id1), "{} paired twice", pairing.id1);
        assert!(seen.insert(pairing.id2), "{} paired twice", pairing.id2);
    }
    assert_eq!(seen, ids.iter().copied().collect::<HashSet<_>>());

    let standings = mgr.player_standings().await.unwrap();
    for pairing in &pairings {
        let a = standing_for(&standings, pairing.id1);
        let b = standing_for(&standings, pairing.id2);
        assert_eq!(a.wins, b.wins, "Round-one winners meet winners");
    }
}

#[tokio::test]
async fn test_pairings_with_odd_player_count() {
    let mgr = setup_manager();
    register_all(&mgr, &["A", "B", "C"]).await;

    match mgr.swiss_pairings().await {
        Err(TournamentError::OddPlayerCount(n)) => assert_eq!(n, 3),
        other => panic!("expected OddPlayerCount, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pairings_with_no_players() {
    let mgr = setup_manager();
    assert!(mgr.swiss_pairings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_reports_leave_no_trace() {
    let repo = Arc::new(InMemoryRepository::new());
    let mgr = TournamentManager::new(repo.clone());
    let ids = register_all(&mgr, &["A", "B"]).await;

    assert!(matches!(
        mgr.report_match(ids[0], ids[0]).await,
        Err(TournamentError::SelfMatch(_))
    ));
    assert!(matches!(
        mgr.report_match(ids[0], 9999).await,
        Err(TournamentError::UnknownPlayer(9999))
    ));

    assert!(repo.matches().await.is_empty());
    let standings = mgr.player_standings().await.unwrap();
    assert!(standings.iter().all(|r| r.matches == 0));
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let mgr = setup_manager();

    let err = mgr.register_player("   ").await.unwrap_err();
    assert!(matches!(err, TournamentError::InvalidName(_)));
    assert_eq!(mgr.count_players().await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleted_players_cannot_report() {
    let mgr = setup_manager();
    let ids = register_all(&mgr, &["A", "B"]).await;
    mgr.delete_players().await.unwrap();

    let err = mgr.report_match(ids[0], ids[1]).await.unwrap_err();
    assert!(matches!(err, TournamentError::UnknownPlayer(id) if id == ids[0]));
}
