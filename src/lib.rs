//! Elo Calc - Elo rating updates for pairwise and multiplayer games
//!
//! This crate computes new ratings from current ratings and a game outcome.
//! It stores nothing: callers supply ratings and persist the results.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use config::EloConfig;
pub use rating::{determine_k, EloRatingCalculator, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
