//! Elo rating calculations
//!
//! This module provides the calculator interface, the Elo implementation and
//! the standalone K-factor lookup.

pub mod calculator;
pub mod elo;
pub mod k_factor;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{expected_score, field_expected_scores, EloRatingCalculator};
pub use k_factor::{determine_k, KFactorTable, KFactorTier};
