//! Ladder application wiring
//!
//! Loads the match history from a source, replays it and builds the report,
//! all driven by one `AppConfig`.

use crate::config::AppConfig;
use crate::error::Result;
use crate::replay::ReplayEngine;
use crate::report::Report;
use crate::source::MatchSource;
use crate::types::ReplayOutcome;
use anyhow::Context;
use tracing::info;

/// Configured replay pipeline
#[derive(Debug, Clone)]
pub struct Ladder {
    config: AppConfig,
    engine: ReplayEngine,
}

impl Ladder {
    /// Build the pipeline, validating the rating settings
    pub fn new(config: AppConfig) -> Result<Self> {
        let engine = config.replay_engine()?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &ReplayEngine {
        &self.engine
    }

    /// Load and replay the full history
    pub fn standings(&self, source: &dyn MatchSource) -> Result<ReplayOutcome> {
        let description = source.describe();
        info!(source = %description, "Loading match history");

        let records = source
            .load()
            .with_context(|| format!("Failed to load matches from {}", description))?;

        let outcome = self
            .engine
            .replay(&records)
            .with_context(|| format!("Failed to replay matches from {}", description))?;

        Ok(outcome)
    }

    /// Load, replay and build the display report
    pub fn report(&self, source: &dyn MatchSource) -> Result<Report> {
        let outcome = self.standings(source)?;
        Ok(Report::from_outcome(&outcome, self.config.report.max_games))
    }

    /// Load, replay and render in the configured format
    pub fn render(&self, source: &dyn MatchSource) -> Result<String> {
        let offset = self.config.report.utc_offset()?;
        self.report(source)?.render(self.config.report.format, offset)
    }
}
