//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use elo_ladder::types::MatchRecord;

/// Fixed reference time all fixture games are offset from
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 1, 17, 0, 0).unwrap()
}

/// A game played `minutes` after the reference time
pub fn game(minutes: i64, player1: &str, player2: &str, winner: &str) -> MatchRecord {
    let (score1, score2) = if winner == player1 { (21, 15) } else { (15, 21) };
    MatchRecord::new(
        base_time() + Duration::minutes(minutes),
        player1,
        player2,
        winner,
        score1,
        score2,
    )
}

/// A week of office games between four regulars, deliberately out of order
pub fn office_league() -> Vec<MatchRecord> {
    vec![
        game(300, "Samson", "Linus", "Linus"),
        game(0, "Samson", "Ada", "Ada"),
        game(60, "Grace", "Linus", "Grace"),
        game(120, "Ada", "Grace", "Ada"),
        game(180, "Linus", "Ada", "Ada"),
        game(240, "Samson", "Grace", "Samson"),
        game(360, "Grace", "Ada", "Grace"),
    ]
}

/// JSON export of the same shape the tabular store produces
pub const STORE_EXPORT: &str = r#"{
    "records": [
        {
            "id": "recB",
            "createdTime": "2021-03-02T10:00:00.000Z",
            "fields": {
                "Date": "2021-03-02T18:00:00.000Z",
                "Player 1": "B",
                "Player 2": "A",
                "Win": "B",
                "Player 1 score": 21,
                "Player 2 score": 19
            }
        },
        {
            "id": "recA",
            "createdTime": "2021-03-01T10:00:00.000Z",
            "fields": {
                "Date": "2021-03-01T18:00:00.000Z",
                "Player 1": "A",
                "Player 2": "B",
                "Win": "A",
                "Player 1 score": 21,
                "Player 2 score": 7
            }
        }
    ]
}"#;
