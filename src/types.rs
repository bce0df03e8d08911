//! Common types used throughout the rating ladder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Player identity, the name as it appears in the match log
pub type PlayerId = String;

/// One played game, as supplied by a match source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: DateTime<Utc>,
    pub player1: PlayerId,
    pub player2: PlayerId,
    /// Must equal `player1` or `player2`
    pub winner: PlayerId,
    pub score1: i64,
    pub score2: i64,
}

impl MatchRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        player1: impl Into<PlayerId>,
        player2: impl Into<PlayerId>,
        winner: impl Into<PlayerId>,
        score1: i64,
        score2: i64,
    ) -> Self {
        Self {
            timestamp,
            player1: player1.into(),
            player2: player2.into(),
            winner: winner.into(),
            score1,
            score2,
        }
    }

    /// Which seat won, or `None` when the winner names neither player
    pub fn winning_seat(&self) -> Option<Seat> {
        if self.winner == self.player1 {
            Some(Seat::Player1)
        } else if self.winner == self.player2 {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerId {
        match seat {
            Seat::Player1 => &self.player1,
            Seat::Player2 => &self.player2,
        }
    }
}

/// Side of a match record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player1,
    Player2,
}

/// Per-participant result of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner,
    Loser,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner => write!(f, "winner"),
            Outcome::Loser => write!(f, "loser"),
        }
    }
}

/// Running rating state for one player during a replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerState {
    pub fn new(initial_rating: f64) -> Self {
        Self {
            rating: initial_rating,
            wins: 0,
            losses: 0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Apply one result to the win/loss counters
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner => self.wins += 1,
            Outcome::Loser => self.losses += 1,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(crate::rating::DEFAULT_INITIAL_RATING)
    }
}

/// A match record enriched with both participants' pre-match ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub player1_rating_before: f64,
    pub player2_rating_before: f64,
}

impl AnnotatedMatch {
    pub fn rating_before(&self, seat: Seat) -> f64 {
        match seat {
            Seat::Player1 => self.player1_rating_before,
            Seat::Player2 => self.player2_rating_before,
        }
    }
}

/// Players ordered by descending rating
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<(PlayerId, PlayerState)>,
}

impl Leaderboard {
    /// Build a leaderboard from player states in discovery order.
    ///
    /// The sort is stable, so players with equal ratings keep the order in
    /// which they were first seen.
    pub fn from_states(mut entries: Vec<(PlayerId, PlayerState)>) -> Self {
        entries.sort_by(|a, b| b.1.rating.total_cmp(&a.1.rating));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerState)> {
        self.entries.iter().map(|(id, state)| (id, state))
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerState> {
        self.entries
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, state)| state)
    }

    /// 1-based position of a player, 1 being the highest rated
    pub fn rank_of(&self, player_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(id, _)| id == player_id)
            .map(|i| i + 1)
    }

    pub fn into_entries(self) -> Vec<(PlayerId, PlayerState)> {
        self.entries
    }
}

/// Both outputs of a replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub leaderboard: Leaderboard,
    /// Annotated matches in chronological order
    pub matches: Vec<AnnotatedMatch>,
}

impl ReplayOutcome {
    /// Annotated matches, most recent first
    pub fn newest_first(&self) -> impl Iterator<Item = &AnnotatedMatch> {
        self.matches.iter().rev()
    }
}
