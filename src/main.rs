//! Command line entry point for the Elo ladder
//!
//! Loads a match log, replays it and prints the leaderboard and game
//! history.

use anyhow::Result;
use clap::Parser;
use elo_ladder::config::AppConfig;
use elo_ladder::report::ReportFormat;
use elo_ladder::{JsonFileSource, Ladder};
use std::path::PathBuf;
use tracing::{error, info};

/// Elo Ladder - leaderboard and per-game ratings from a match log
#[derive(Parser)]
#[command(
    name = "elo-ladder",
    version,
    about = "Replay a match log into an Elo leaderboard",
    long_about = "Elo Ladder reads a JSON export of two-player match results, replays the \
                 full history in timestamp order and prints each player's rating, wins and \
                 losses together with the rating both players held going into every game."
)]
struct Args {
    /// Match log to replay
    #[arg(value_name = "MATCHES", help = "Path to the JSON match log")]
    input: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Output format override
    #[arg(short, long, value_enum, help = "Override report format")]
    format: Option<ReportFormat>,

    /// K-factor override
    #[arg(short, long, value_name = "K", help = "Override maximum rating change per game")]
    k_factor: Option<f64>,

    /// Game history length override
    #[arg(long, value_name = "N", help = "Only list the N most recent games")]
    max_games: Option<usize>,

    /// Date display offset override
    #[arg(
        long,
        value_name = "MINUTES",
        allow_hyphen_values = true,
        help = "Show game dates at this offset from UTC, in minutes"
    )]
    utc_offset: Option<i32>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and input, print nothing)
    #[arg(long, help = "Validate configuration and match log, then exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(config_path) => AppConfig::from_file(config_path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(format) = args.format {
        config.report.format = format;
    }

    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }

    if let Some(max_games) = args.max_games {
        config.report.max_games = Some(max_games);
    }

    if let Some(utc_offset) = args.utc_offset {
        config.report.utc_offset_minutes = utc_offset;
    }

    elo_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        service = %config.service.name,
        k_factor = config.rating.k_factor,
        initial_rating = config.rating.initial_rating,
        format = %config.report.format,
        "Starting replay"
    );

    let ladder = Ladder::new(config)?;
    let source = JsonFileSource::new(args.input.clone());

    if args.dry_run {
        return match ladder.standings(&source) {
            Ok(outcome) => {
                info!(
                    matches = outcome.matches.len(),
                    players = outcome.leaderboard.len(),
                    "Dry run completed - match log is valid"
                );
                Ok(())
            }
            Err(e) => {
                error!("Match log rejected: {:#}", e);
                std::process::exit(1);
            }
        };
    }

    match ladder.render(&source) {
        Ok(rendered) => {
            println!("{}", rendered.trim_end());
            Ok(())
        }
        Err(e) => {
            error!("Replay failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
