use std::fs;

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::game::{Phase, Winner};
use holdem_engine::log::{format_hand_id, ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use holdem_engine::player::Action;

fn sample_record(hand_id: &str) -> HandRecord {
    HandRecord {
        hand_id: hand_id.to_string(),
        seed: Some(42),
        actions: vec![
            ActionRecord {
                seat: 0,
                phase: Phase::Preflop,
                action: Action::Call,
            },
            ActionRecord {
                seat: 1,
                phase: Phase::Preflop,
                action: Action::Raise(40),
            },
        ],
        board: vec![Card {
            suit: Suit::Hearts,
            rank: Rank::Ace,
        }],
        winner: Some(Winner::Seat(1)),
        pot: 120,
        ts: None,
        meta: None,
        showdown: Some(ShowdownInfo {
            winners: vec![1],
            notes: Some("One Pair (A♥)".to_string()),
        }),
    }
}

#[test]
fn hand_ids_are_date_plus_padded_sequence() {
    assert_eq!(format_hand_id("20250101", 7), "20250101-000007");
    let mut logger = HandLogger::with_seq_for_test("20250101");
    assert_eq!(logger.next_id(), "20250101-000001");
    assert_eq!(logger.next_id(), "20250101-000002");
}

#[test]
fn records_round_trip_through_json() {
    let record = sample_record("20250101-000001");
    let json = serde_json::to_string(&record).expect("serialize");
    let back: HandRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, record);
}

#[test]
fn logger_writes_one_json_object_per_line_with_a_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create");

    logger.write(&sample_record("20250101-000001")).expect("write");
    logger.write(&sample_record("20250101-000002")).expect("write");

    let contents = fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let parsed: HandRecord = serde_json::from_str(line).expect("valid json");
        assert!(parsed.ts.is_some());
    }
}

#[test]
fn explicit_timestamps_are_preserved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create");

    let mut record = sample_record("20250101-000001");
    record.ts = Some("2025-01-01T00:00:00Z".to_string());
    logger.write(&record).expect("write");

    let contents = fs::read_to_string(&path).expect("read back");
    let parsed: HandRecord = serde_json::from_str(contents.trim()).expect("valid json");
    assert_eq!(parsed.ts.as_deref(), Some("2025-01-01T00:00:00Z"));
}
