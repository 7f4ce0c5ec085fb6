//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use elo_calc::config::EloConfig;
use elo_calc::types::{CompetitorId, Rating, RatingSet};
use elo_calc::EloRatingCalculator;

/// Calculator with the default configuration (K = 32, loss scored 0.5)
pub fn default_calculator() -> EloRatingCalculator {
    EloRatingCalculator::new(EloConfig::default()).expect("default config is valid")
}

/// Calculator scoring a loss as 0
pub fn conventional_calculator() -> EloRatingCalculator {
    EloRatingCalculator::new(EloConfig::conventional()).expect("conventional config is valid")
}

/// Build a rating set from `(id, rating)` pairs
pub fn rating_set(entries: &[(CompetitorId, Rating)]) -> RatingSet {
    entries.iter().copied().collect()
}

/// A four-player table with a spread of ratings
pub fn four_player_table() -> RatingSet {
    rating_set(&[(1, 1600), (2, 1500), (3, 1400), (4, 1450)])
}

/// Competitors spanning all three K-factor tiers
pub fn mixed_tier_table() -> RatingSet {
    rating_set(&[(10, 1850), (11, 2150), (12, 2450)])
}
