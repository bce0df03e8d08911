//! JSON match source
//!
//! Reads match logs exported from the tabular store the ladder is kept in.
//! Two layouts are accepted: a bare array of field objects, or the store's
//! list response (`{"records": [{"fields": {...}}]}`). Field names follow
//! the store's columns: "Date", "Player 1", "Player 2", "Win",
//! "Player 1 score" and "Player 2 score".

use crate::error::{LadderError, Result};
use crate::source::MatchSource;
use crate::types::MatchRecord;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One row as stored, before any field is checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMatchRecord {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Player 1")]
    pub player1: Option<String>,
    #[serde(rename = "Player 2")]
    pub player2: Option<String>,
    #[serde(rename = "Win")]
    pub winner: Option<String>,
    #[serde(rename = "Player 1 score")]
    pub score1: Option<i64>,
    #[serde(rename = "Player 2 score")]
    pub score2: Option<i64>,
}

impl RawMatchRecord {
    /// Convert to a match record, `index` being the row position
    pub fn into_record(self, index: usize) -> std::result::Result<MatchRecord, LadderError> {
        let missing = |field: &str| LadderError::MissingField {
            index,
            field: field.to_string(),
        };

        let date = self.date.ok_or_else(|| missing("Date"))?;
        let timestamp = parse_timestamp(&date).ok_or_else(|| LadderError::InvalidTimestamp {
            index,
            value: date.clone(),
        })?;

        Ok(MatchRecord {
            timestamp,
            player1: self.player1.ok_or_else(|| missing("Player 1"))?,
            player2: self.player2.ok_or_else(|| missing("Player 2"))?,
            winner: self.winner.ok_or_else(|| missing("Win"))?,
            score1: self.score1.ok_or_else(|| missing("Player 1 score"))?,
            score2: self.score2.ok_or_else(|| missing("Player 2 score"))?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StoredRow {
    fields: RawMatchRecord,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Rows(Vec<RawMatchRecord>),
    ListResponse { records: Vec<StoredRow> },
}

impl Document {
    fn into_rows(self) -> Vec<RawMatchRecord> {
        match self {
            Document::Rows(rows) => rows,
            Document::ListResponse { records } => records.into_iter().map(|r| r.fields).collect(),
        }
    }
}

/// Parse a stored date value.
///
/// Accepts RFC 3339 (`2021-03-04T18:30:00.000Z`), a zone-less date-time
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Parse a JSON match log into records, rejecting the first bad row
pub fn parse_records(json: &str) -> Result<Vec<MatchRecord>> {
    let document: Document =
        serde_json::from_str(json).context("Match log is not a recognised JSON layout")?;

    let records = document
        .into_rows()
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_record(index))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(count = records.len(), "Parsed match records");
    Ok(records)
}

/// Match source reading a JSON export from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MatchSource for JsonFileSource {
    fn load(&self) -> Result<Vec<MatchRecord>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read match log {}", self.path.display()))?;

        let records = parse_records(&contents)
            .with_context(|| format!("Failed to parse match log {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            count = records.len(),
            "Loaded match log"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
