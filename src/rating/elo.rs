//! Elo rating system implementation
//!
//! This module provides the concrete rating calculator backed by the Elo
//! algorithm from the skillratings crate: logistic expected score on a
//! 400-point scale and a fixed K-factor update.

use crate::error::LadderError;
use crate::rating::calculator::{RatingCalculator, RatingUpdate};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Starting rating for players seen for the first time
pub const DEFAULT_INITIAL_RATING: f64 = 1000.0;

/// Maximum rating change per game
pub const DEFAULT_K_FACTOR: f64 = 30.0;

/// Extended configuration for the Elo rating system
/// This wraps the skillratings EloConfig with the starting rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Core Elo parameters (K-factor)
    pub elo_config: EloConfig,
    /// Initial rating for new players
    pub initial_rating: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            elo_config: EloConfig {
                k: DEFAULT_K_FACTOR,
            },
            initial_rating: DEFAULT_INITIAL_RATING,
        }
    }
}

impl ExtendedEloConfig {
    pub fn new(k_factor: f64, initial_rating: f64) -> Self {
        Self {
            elo_config: EloConfig { k: k_factor },
            initial_rating,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), LadderError> {
        if !self.elo_config.k.is_finite() || self.elo_config.k <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.elo_config.k),
            });
        }

        if !self.initial_rating.is_finite() {
            return Err(LadderError::ConfigurationError {
                message: "Initial rating must be a finite number".to_string(),
            });
        }

        Ok(())
    }
}

impl From<Outcome> for Outcomes {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner => Outcomes::WIN,
            Outcome::Loser => Outcomes::LOSS,
        }
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone, Default)]
pub struct EloCalculator {
    config: ExtendedEloConfig,
}

impl EloCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: ExtendedEloConfig) -> Result<Self, LadderError> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtendedEloConfig {
        &self.config
    }
}

impl RatingCalculator for EloCalculator {
    fn expected_score(&self, rating: f64, opponent_rating: f64) -> f64 {
        let (expected, _) = expected_score(
            &EloRating { rating },
            &EloRating {
                rating: opponent_rating,
            },
        );
        expected
    }

    fn rate(&self, rating: f64, opponent_rating: f64, outcome: Outcome) -> RatingUpdate {
        let (player, opponent) = elo(
            &EloRating { rating },
            &EloRating {
                rating: opponent_rating,
            },
            &Outcomes::from(outcome),
            &self.config.elo_config,
        );

        RatingUpdate {
            player: player.rating,
            opponent: opponent.rating,
        }
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn k_factor(&self) -> f64 {
        self.config.elo_config.k
    }
}
