//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! elo-ladder tool, including environment variable and TOML file loading
//! and validation.

use crate::config::rating::RatingSettings;
use crate::replay::ReplayEngine;
use crate::report::ReportFormat;
use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub report: ReportSettings,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: ReportFormat,
    /// Only show this many of the most recent games
    pub max_games: Option<usize>,
    /// Offset from UTC, in minutes, for dates in the text report
    pub utc_offset_minutes: i32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            max_games: None,
            utc_offset_minutes: 0,
        }
    }
}

impl ReportSettings {
    /// Display offset for game dates
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow!(
                    "UTC offset must be within +/-24 hours, got {} minutes",
                    self.utc_offset_minutes
                )
            })
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|name| env::var(name).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still win
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_overrides(|name| env::var(name).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Some(k) = lookup("ELO_K_FACTOR") {
            self.rating.k_factor = parse_var("ELO_K_FACTOR", &k)?;
        }
        if let Some(initial) = lookup("ELO_INITIAL_RATING") {
            self.rating.initial_rating = parse_var("ELO_INITIAL_RATING", &initial)?;
        }
        if let Some(max) = lookup("MAX_MATCHES") {
            self.rating.max_matches = Some(parse_var("MAX_MATCHES", &max)?);
        }

        // Report settings
        if let Some(format) = lookup("REPORT_FORMAT") {
            self.report.format = parse_var("REPORT_FORMAT", &format)?;
        }
        if let Some(max) = lookup("REPORT_MAX_GAMES") {
            self.report.max_games = Some(parse_var("REPORT_MAX_GAMES", &max)?);
        }
        if let Some(offset) = lookup("REPORT_UTC_OFFSET_MINUTES") {
            self.report.utc_offset_minutes = parse_var("REPORT_UTC_OFFSET_MINUTES", &offset)?;
        }

        Ok(())
    }

    /// Build a replay engine from the rating settings
    pub fn replay_engine(&self) -> Result<ReplayEngine> {
        let engine = ReplayEngine::from_config(self.rating.elo_config())?;
        Ok(match self.rating.max_matches {
            Some(limit) => engine.with_max_matches(limit),
            None => engine,
        })
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate rating settings
    config.rating.elo_config().validate()?;
    if config.rating.max_matches == Some(0) {
        return Err(anyhow!("Max matches must be greater than 0"));
    }

    // Validate report settings
    config.report.utc_offset()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingCalculator;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.rating.k_factor, 30.0);
        assert_eq!(config.rating.initial_rating, 1000.0);
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                ("LOG_LEVEL", "debug"),
                ("ELO_K_FACTOR", "24"),
                ("ELO_INITIAL_RATING", "1200"),
                ("MAX_MATCHES", "5000"),
                ("REPORT_FORMAT", "json"),
                ("REPORT_MAX_GAMES", "20"),
                ("REPORT_UTC_OFFSET_MINUTES", "-300"),
            ]))
            .unwrap();

        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.rating.k_factor, 24.0);
        assert_eq!(config.rating.initial_rating, 1200.0);
        assert_eq!(config.rating.max_matches, Some(5000));
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.max_games, Some(20));
        assert_eq!(config.report.utc_offset_minutes, -300);
        assert_eq!(
            config.report.utc_offset().unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup(&[("ELO_K_FACTOR", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("ELO_K_FACTOR"));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.max_matches = Some(0);
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.report.utc_offset_minutes = 24 * 60;
        assert!(validate_config(&config).is_err());
        config.report.utc_offset_minutes = 14 * 60;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AppConfig::from_toml_str(
            r#"
            [rating]
            k_factor = 16.0

            [report]
            format = "json"
            max_games = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.k_factor, 16.0);
        assert_eq!(config.rating.initial_rating, 1000.0);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.max_games, Some(10));
        assert_eq!(config.service.name, "elo-ladder");
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(AppConfig::from_toml_str("[rating]\nk_factor = -3.0\n").is_err());
        assert!(AppConfig::from_toml_str("[report]\nformat = \"html\"\n").is_err());
    }

    #[test]
    fn test_replay_engine_from_config() {
        let mut config = AppConfig::default();
        config.rating.max_matches = Some(1);
        let engine = config.replay_engine().unwrap();

        assert_eq!(engine.calculator().k_factor(), 30.0);
        assert!(engine.replay(&[]).is_ok());
    }
}
