//! Rating system configuration

use crate::rating::{ExtendedEloConfig, DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR};
use serde::{Deserialize, Serialize};

/// Elo parameters and replay limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Maximum rating change per game
    pub k_factor: f64,
    /// Rating for players seen for the first time
    pub initial_rating: f64,
    /// Refuse to replay histories longer than this
    pub max_matches: Option<usize>,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_INITIAL_RATING,
            max_matches: None,
        }
    }
}

impl RatingSettings {
    pub fn elo_config(&self) -> ExtendedEloConfig {
        ExtendedEloConfig::new(self.k_factor, self.initial_rating)
    }
}
