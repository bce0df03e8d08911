//! Pre-replay validation of match records
//!
//! Every record is checked before any rating state exists, so a bad record
//! rejects the whole replay instead of leaving it half applied.

use crate::error::LadderError;
use crate::types::{MatchRecord, Outcome, Seat};

/// A record that passed validation, with its winner resolved to a seat
#[derive(Debug, Clone, Copy)]
pub struct ValidatedMatch<'a> {
    /// Position in the caller's input
    pub index: usize,
    pub record: &'a MatchRecord,
    pub winner: Seat,
}

impl ValidatedMatch<'_> {
    /// Result of this match for the given seat
    pub fn outcome_for(&self, seat: Seat) -> Outcome {
        if seat == self.winner {
            Outcome::Winner
        } else {
            Outcome::Loser
        }
    }
}

/// Check a single record, `index` being its position in the caller's input
pub fn validate_record(index: usize, record: &MatchRecord) -> Result<Seat, LadderError> {
    let malformed = |reason: &str| LadderError::MalformedRecord {
        index,
        player1: record.player1.clone(),
        player2: record.player2.clone(),
        reason: reason.to_string(),
    };

    if record.player1.trim().is_empty() || record.player2.trim().is_empty() {
        return Err(malformed("player name is empty"));
    }

    if record.player1 == record.player2 {
        return Err(malformed("a player cannot play against themselves"));
    }

    record.winning_seat().ok_or_else(|| {
        malformed(&format!(
            "winner \"{}\" is neither participant",
            record.winner
        ))
    })
}

/// Validate all records, failing on the first offending one
pub fn validate_records(records: &[MatchRecord]) -> Result<Vec<ValidatedMatch<'_>>, LadderError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            validate_record(index, record).map(|winner| ValidatedMatch {
                index,
                record,
                winner,
            })
        })
        .collect()
}
