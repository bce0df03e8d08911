//! Rating system integration using the Elo algorithm
//!
//! This module provides the per-match rating calculation and its
//! integration with the skillratings crate.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{RatingCalculator, RatingUpdate};
pub use elo::{EloCalculator, ExtendedEloConfig, DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR};

#[cfg(test)]
pub use calculator::MockRatingCalculator;
