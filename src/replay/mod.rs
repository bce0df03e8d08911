//! Match history replay
//!
//! This module validates a complete match log and folds it, in timestamp
//! order, into a leaderboard and a per-game rating annotation.

pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use engine::{replay, ReplayEngine};
pub use validation::{validate_record, validate_records, ValidatedMatch};
