//! Error types for the Elo calculator
//!
//! The default rating operations never fail. These errors are raised only by
//! the opt-in strict operations, configuration loading and input parsing.

use crate::types::CompetitorId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum EloError {
    #[error("Rating set is empty")]
    EmptyRatingSet,

    #[error("Winner not found in rating set: {winner}")]
    WinnerNotFound { winner: CompetitorId },

    #[error("Unrecognized outcome: {token:?}")]
    InvalidOutcome { token: String },

    #[error("Invalid rating entry {entry:?}, expected ID=RATING")]
    InvalidRatingEntry { entry: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
