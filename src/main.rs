//! Command-line entry point for the Elo calculator
//!
//! Reads current ratings and an outcome from the command line, runs them
//! through the library and prints the result as JSON on stdout. Logs go to
//! stderr.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use elo_calc::config::{AppConfig, EloConfig};
use elo_calc::types::{CompetitorId, Outcome, Rating, RatingChange, RatingSet};
use elo_calc::utils::{parse_rating_entry, rating_changes, round_half_up};
use elo_calc::{EloError, EloRatingCalculator, RatingCalculator};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Elo Calc - rating updates for pairwise and multiplayer games
#[derive(Parser)]
#[command(
    name = "elo-calc",
    version,
    about = "Compute Elo rating updates for pairwise and multiplayer games",
    long_about = "Elo Calc computes new ratings from current ratings and a game outcome. \
                 It stores nothing: ratings are read from the command line and the \
                 updated ratings are printed as JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug logging")]
    debug: bool,

    /// K-factor override
    #[arg(long, global = true, value_name = "K", help = "Override the K-factor")]
    k_factor: Option<u32>,

    /// Loss score override
    #[arg(
        long,
        global = true,
        value_name = "SCORE",
        help = "Override the actual score credited for a loss"
    )]
    loss_score: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update competitor A's rating after a two-player game
    Pair {
        /// Rating of competitor A
        #[arg(long, allow_hyphen_values = true)]
        a: Rating,
        /// Rating of competitor B
        #[arg(long, allow_hyphen_values = true)]
        b: Rating,
        /// Result for A: + (win), = (draw), - (loss), or win/draw/loss
        #[arg(long, allow_hyphen_values = true)]
        outcome: String,
        /// Also update competitor B
        #[arg(long)]
        both: bool,
        /// Use the K-factor table for each side's own rating
        #[arg(long)]
        adaptive_k: bool,
        /// Fail on an unrecognized outcome instead of leaving ratings unchanged
        #[arg(long)]
        strict: bool,
    },
    /// Update every rating after a multiplayer game with a single winner
    Multiplayer {
        /// Id of the winning competitor
        #[arg(long, allow_hyphen_values = true)]
        winner: CompetitorId,
        /// Use the K-factor table for the mean field rating
        #[arg(long)]
        adaptive_k: bool,
        /// Fail on an empty field or a winner missing from it
        #[arg(long)]
        strict: bool,
        /// Competitor ratings as ID=RATING
        #[arg(value_name = "ID=RATING", allow_hyphen_values = true)]
        ratings: Vec<String>,
    },
    /// Look up the K-factor for a rating
    KFactor {
        #[arg(allow_hyphen_values = true)]
        rating: Rating,
    },
}

#[derive(Debug, Serialize)]
struct PairReport {
    outcome: Option<Outcome>,
    rating_a: Rating,
    rating_b: Rating,
    k_factor: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    k_factor_b: Option<u32>,
    new_rating_a: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_rating_b: Option<Rating>,
}

#[derive(Debug, Serialize)]
struct MultiplayerReport {
    winner: CompetitorId,
    k_factor: u32,
    changes: Vec<RatingChange>,
}

#[derive(Debug, Serialize)]
struct KFactorReport {
    rating: Rating,
    k_factor: u32,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }

    if let Some(loss_score) = args.loss_score {
        config.rating.scores.loss = loss_score;
    }

    elo_calc::config::validate_config(&config)?;
    Ok(config)
}

/// Calculator for one side of a game, with the K-factor optionally taken from
/// the table
fn calculator_for(
    config: &EloConfig,
    rating: Rating,
    adaptive_k: bool,
) -> Result<EloRatingCalculator> {
    let mut config = config.clone();
    if adaptive_k {
        config.k_factor = config.k_factor_table.lookup(rating);
        debug!("Adaptive K-factor {} for rating {}", config.k_factor, rating);
    }
    EloRatingCalculator::new(config)
}

fn run_pair(
    config: &EloConfig,
    (rating_a, rating_b): (Rating, Rating),
    token: &str,
    both: bool,
    adaptive_k: bool,
    strict: bool,
) -> Result<PairReport> {
    let calculator_a = calculator_for(config, rating_a, adaptive_k)?;
    // The command line also takes win/draw/loss; the library token is exact
    let outcome = token.parse::<Outcome>().ok();

    let new_rating_a = match outcome {
        Some(outcome) => calculator_a.update_pair_rating(rating_a, rating_b, outcome),
        None if strict => {
            return Err(EloError::InvalidOutcome {
                token: token.to_string(),
            }
            .into())
        }
        None => calculator_a.update_pair_rating_token(rating_a, rating_b, token),
    };

    // Not update_pair: with --adaptive-k, B is updated with its own K
    let (k_factor_b, new_rating_b) = if both {
        let calculator_b = calculator_for(config, rating_b, adaptive_k)?;
        let new_rating_b = match outcome {
            Some(outcome) => {
                calculator_b.update_pair_rating(rating_b, rating_a, outcome.reversed())
            }
            None => rating_b,
        };
        (Some(calculator_b.k_factor()), Some(new_rating_b))
    } else {
        (None, None)
    };

    Ok(PairReport {
        outcome,
        rating_a,
        rating_b,
        k_factor: calculator_a.k_factor(),
        k_factor_b,
        new_rating_a,
        new_rating_b,
    })
}

fn run_multiplayer(
    config: &EloConfig,
    winner: CompetitorId,
    entries: &[String],
    adaptive_k: bool,
    strict: bool,
) -> Result<MultiplayerReport> {
    let mut ratings = RatingSet::with_capacity(entries.len());
    for entry in entries {
        let (id, rating) = parse_rating_entry(entry)?;
        if ratings.insert(id, rating).is_some() {
            return Err(anyhow!("Duplicate competitor id: {}", id));
        }
    }

    let mean_rating = if ratings.is_empty() {
        0
    } else {
        round_half_up(ratings.values().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64)
    };
    let calculator = calculator_for(config, mean_rating, adaptive_k)?;

    let updated = if strict {
        calculator.try_update_multiplayer(&ratings, winner)?
    } else {
        calculator.update_multiplayer(&ratings, winner)
    };

    Ok(MultiplayerReport {
        winner,
        k_factor: calculator.k_factor(),
        changes: rating_changes(&ratings, &updated),
    })
}

fn run(args: &Args, config: &AppConfig) -> Result<String> {
    let rating = &config.rating;

    let json = match &args.command {
        Command::Pair {
            a,
            b,
            outcome,
            both,
            adaptive_k,
            strict,
        } => serde_json::to_string_pretty(&run_pair(
            rating,
            (*a, *b),
            outcome,
            *both,
            *adaptive_k,
            *strict,
        )?)?,
        Command::Multiplayer {
            winner,
            adaptive_k,
            strict,
            ratings,
        } => serde_json::to_string_pretty(&run_multiplayer(
            rating,
            *winner,
            ratings,
            *adaptive_k,
            *strict,
        )?)?,
        Command::KFactor { rating: value } => {
            let calculator = EloRatingCalculator::new(rating.clone())?;
            serde_json::to_string_pretty(&KFactorReport {
                rating: *value,
                k_factor: calculator.determine_k(*value),
            })?
        }
    };

    Ok(json)
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("{} v{} starting", config.service.name, elo_calc::VERSION);

    match run(&args, &config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
