//! Tests for the SQLite best-score repository.

use tempfile::NamedTempFile;

use memory_pairs::ScoreRepository;
use pairs_core::{BestScore, BoardSize, GameEvent, HighScores, ScoreStore};

/// Creates a temporary database file and a migrated repository; the file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, ScoreRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ScoreRepository::new(db_path).expect("Failed to create repository");
    (db_file, repo)
}

#[test]
fn test_get_on_empty_table_is_none() {
    let (_db, repo) = setup_test_db();
    for size in [BoardSize::Two, BoardSize::Eight] {
        assert!(repo.get_best(size).expect("Query failed").is_none());
    }
}

#[test]
fn test_set_then_get() {
    let (_db, mut repo) = setup_test_db();
    repo.set(BoardSize::Four, BestScore::new(42, "Ada".to_string()))
        .expect("Set failed");
    let best = repo.get(BoardSize::Four).expect("Get failed");
    assert_eq!(best, Some(BestScore::new(42, "Ada".to_string())));
    assert!(repo.get(BoardSize::Six).expect("Get failed").is_none());
}

#[test]
fn test_set_overwrites_same_size() {
    let (_db, mut repo) = setup_test_db();
    repo.set(BoardSize::Two, BestScore::new(20, "Ada".to_string()))
        .expect("First set failed");
    repo.set(BoardSize::Two, BestScore::new(12, "Grace".to_string()))
        .expect("Second set failed");

    let all = repo.list_best().expect("List failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], (BoardSize::Two, BestScore::new(12, "Grace".to_string())));
}

#[test]
fn test_records_survive_reopen() {
    let (db, repo) = setup_test_db();
    repo.upsert_best(BoardSize::Six, &BestScore::new(300, "Ada".to_string()))
        .expect("Upsert failed");
    drop(repo);

    let reopened = ScoreRepository::new(db.path().to_str().expect("Invalid path"))
        .expect("Reopen failed");
    assert_eq!(
        reopened.get_best(BoardSize::Six).expect("Get failed"),
        Some(BestScore::new(300, "Ada".to_string()))
    );
}

#[test]
fn test_list_is_ordered_by_size() {
    let (_db, repo) = setup_test_db();
    repo.upsert_best(BoardSize::Eight, &BestScore::new(900, "Ada".to_string()))
        .expect("Upsert failed");
    repo.upsert_best(BoardSize::Two, &BestScore::new(5, "Grace".to_string()))
        .expect("Upsert failed");

    let sizes = repo
        .list_best()
        .expect("List failed")
        .into_iter()
        .map(|(size, _)| size)
        .collect::<Vec<_>>();
    assert_eq!(sizes, vec![BoardSize::Two, BoardSize::Eight]);
}

#[test]
fn test_clear_removes_everything() {
    let (_db, repo) = setup_test_db();
    repo.upsert_best(BoardSize::Two, &BestScore::new(5, "Ada".to_string()))
        .expect("Upsert failed");
    repo.upsert_best(BoardSize::Four, &BestScore::new(50, "Ada".to_string()))
        .expect("Upsert failed");
    assert_eq!(repo.clear().expect("Clear failed"), 2);
    assert!(repo.list_best().expect("List failed").is_empty());
}

#[test]
fn test_high_scores_over_sqlite() {
    let (_db, repo) = setup_test_db();
    let mut scores = HighScores::new(repo);

    let first = scores.submit(BoardSize::Four, 60, "Ada").expect("Submit failed");
    assert_eq!(
        first,
        Some(GameEvent::NewHighScore {
            seconds: 60,
            player_name: "Ada".to_string()
        })
    );
    assert!(scores.submit(BoardSize::Four, 60, "Grace").expect("Submit failed").is_none());
    assert!(scores.submit(BoardSize::Four, 59, "Grace").expect("Submit failed").is_some());

    let table = scores.table().expect("Table failed");
    assert_eq!(table.len(), 4);
    assert_eq!(
        table[1].best().as_ref().map(|b| b.player_name().as_str()),
        Some("Grace")
    );
}

#[test]
fn test_bad_path_fails() {
    let result = ScoreRepository::new("/nonexistent-dir/scores.db");
    assert!(result.is_err(), "Opening under a missing directory should fail");
}
