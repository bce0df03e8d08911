//! Match sources
//!
//! A match source supplies the raw match history to replay. Retrieval lives
//! entirely behind this trait so the replay engine never sees where records
//! came from.

pub mod json;

pub use json::{parse_records, parse_timestamp, JsonFileSource, RawMatchRecord};

use crate::error::Result;
use crate::types::MatchRecord;

/// Trait for loading the full match history
#[cfg_attr(test, mockall::automock)]
pub trait MatchSource: Send + Sync {
    /// Load every recorded match, in any order
    fn load(&self) -> Result<Vec<MatchRecord>>;

    /// Human readable description for logs
    fn describe(&self) -> String;
}

/// Match source over records already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticMatchSource {
    records: Vec<MatchRecord>,
}

impl StaticMatchSource {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

impl MatchSource for StaticMatchSource {
    fn load(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}
