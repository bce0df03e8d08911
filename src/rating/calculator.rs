//! Rating calculator trait
//!
//! This module defines the interface for the per-match rating math used by
//! the replay engine.

use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// New ratings for both participants of a decided match, in the order they
/// were passed to [`RatingCalculator::rate`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player: f64,
    pub opponent: f64,
}

impl RatingUpdate {
    /// Rating change for the player, relative to the pre-match rating
    pub fn player_delta(&self, player_before: f64) -> f64 {
        self.player - player_before
    }

    /// Rating change for the opponent, relative to the pre-match rating
    pub fn opponent_delta(&self, opponent_before: f64) -> f64 {
        self.opponent - opponent_before
    }
}

/// Trait for calculating rating changes after a two-player game
#[cfg_attr(test, mockall::automock)]
pub trait RatingCalculator: Send + Sync {
    /// Probability estimate (0.0 to 1.0) that a player rated `rating` beats
    /// one rated `opponent_rating`
    fn expected_score(&self, rating: f64, opponent_rating: f64) -> f64;

    /// Calculate both participants' new ratings from their pre-match ratings,
    /// `outcome` being the result from the first player's side
    fn rate(&self, rating: f64, opponent_rating: f64, outcome: Outcome) -> RatingUpdate;

    /// Rating assigned to a player the first time they are seen
    fn initial_rating(&self) -> f64;

    /// Maximum rating change applied per game
    fn k_factor(&self) -> f64;
}
