//! Elo Ladder - rating replay for a round-robin match log
//!
//! This crate replays a complete history of two-player match results into
//! Elo ratings, producing a leaderboard and the rating each player held
//! going into every game.

pub mod config;
pub mod error;
pub mod rating;
pub mod replay;
pub mod report;
pub mod service;
pub mod source;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{EloCalculator, RatingCalculator};
pub use replay::{replay, ReplayEngine};
pub use service::Ladder;
pub use source::{JsonFileSource, MatchSource, StaticMatchSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
