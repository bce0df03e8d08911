//! Error types for the rating ladder
//!
//! Replay validation failures are typed so callers can tell which record was
//! rejected. Outer layers (config, sources, the binary) use anyhow.

use crate::types::PlayerId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("Malformed match record #{index} ({player1} vs {player2}): {reason}")]
    MalformedRecord {
        index: usize,
        player1: PlayerId,
        player2: PlayerId,
        reason: String,
    },

    #[error("Match record #{index} is missing field \"{field}\"")]
    MissingField { index: usize, field: String },

    #[error("Match record #{index} has an invalid timestamp \"{value}\"")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Too many matches to replay: {count} exceeds limit of {limit}")]
    TooManyMatches { count: usize, limit: usize },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
