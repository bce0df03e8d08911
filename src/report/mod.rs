//! Presentation of replay results
//!
//! Turns a replay outcome into display rows (ratings floored to whole
//! points, games newest first) and renders them as text tables or JSON.

pub mod table;

use crate::error::Result;
use crate::types::{PlayerId, ReplayOutcome, Seat};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output format for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(anyhow::anyhow!("Unknown report format: {}", other)),
        }
    }
}

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: PlayerId,
    pub rating: i64,
    pub wins: u32,
    pub losses: u32,
}

/// One past game with both players' ratings going into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub date: DateTime<Utc>,
    pub player1: PlayerId,
    pub player1_rating_before: i64,
    pub score1: i64,
    pub player2: PlayerId,
    pub player2_rating_before: i64,
    pub score2: i64,
    /// `None` when the recorded winner names neither player
    pub winner: Option<Seat>,
}

/// Display-ready view of a replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub leaderboard: Vec<LeaderboardRow>,
    /// Most recent game first
    pub games: Vec<GameRow>,
}

/// Floor a rating to whole points for display
pub fn display_rating(rating: f64) -> i64 {
    rating.floor() as i64
}

impl Report {
    /// Build the report, keeping at most `max_games` of the newest games
    pub fn from_outcome(outcome: &ReplayOutcome, max_games: Option<usize>) -> Self {
        let leaderboard = outcome
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, (name, state))| LeaderboardRow {
                rank: i + 1,
                name: name.clone(),
                rating: display_rating(state.rating),
                wins: state.wins,
                losses: state.losses,
            })
            .collect();

        let games = outcome
            .newest_first()
            .take(max_games.unwrap_or(usize::MAX))
            .map(|game| {
                let record = &game.record;
                GameRow {
                    date: record.timestamp,
                    player1: record.player1.clone(),
                    player1_rating_before: display_rating(game.rating_before(Seat::Player1)),
                    score1: record.score1,
                    player2: record.player2.clone(),
                    player2_rating_before: display_rating(game.rating_before(Seat::Player2)),
                    score2: record.score2,
                    winner: record.winning_seat(),
                }
            })
            .collect();

        Self { leaderboard, games }
    }

    /// Render in the requested format. Text dates are shown at `offset`
    /// from UTC; JSON keeps them in UTC.
    pub fn render(&self, format: ReportFormat, offset: FixedOffset) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(table::render_text(self, offset)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
