//! Tests for best-time evaluation.

use pairs_core::{BoardSize, GameEvent, HighScores, MemoryScoreStore};

#[test]
fn test_first_score_is_high_score() {
    let mut scores = HighScores::new(MemoryScoreStore::new());
    let event = scores.submit(BoardSize::Two, 12, "Ada").unwrap();
    assert_eq!(
        event,
        Some(GameEvent::NewHighScore {
            seconds: 12,
            player_name: "Ada".to_string()
        })
    );
    let best = scores.best(BoardSize::Two).unwrap().expect("stored");
    assert_eq!(*best.seconds(), 12);
    assert_eq!(best.player_name(), "Ada");
}

#[test]
fn test_equal_time_does_not_overwrite() {
    let mut scores = HighScores::new(MemoryScoreStore::new());
    scores.submit(BoardSize::Four, 30, "Ada").unwrap();
    assert_eq!(scores.submit(BoardSize::Four, 30, "Grace").unwrap(), None);
    let best = scores.best(BoardSize::Four).unwrap().expect("stored");
    assert_eq!(best.player_name(), "Ada");
}

#[test]
fn test_slower_time_does_not_overwrite() {
    let mut scores = HighScores::new(MemoryScoreStore::new());
    scores.submit(BoardSize::Four, 30, "Ada").unwrap();
    assert_eq!(scores.submit(BoardSize::Four, 31, "Grace").unwrap(), None);
}

#[test]
fn test_strictly_faster_time_replaces_record() {
    let mut scores = HighScores::new(MemoryScoreStore::new());
    scores.submit(BoardSize::Four, 30, "Ada").unwrap();
    assert!(scores.submit(BoardSize::Four, 29, "Grace").unwrap().is_some());
    let best = scores.best(BoardSize::Four).unwrap().expect("stored");
    assert_eq!(*best.seconds(), 29);
    assert_eq!(best.player_name(), "Grace");
}

#[test]
fn test_records_are_per_board_size() {
    let mut scores = HighScores::new(MemoryScoreStore::new());
    scores.submit(BoardSize::Two, 5, "Ada").unwrap();
    assert!(scores.submit(BoardSize::Eight, 500, "Grace").unwrap().is_some());
    assert!(scores.best(BoardSize::Six).unwrap().is_none());
}
