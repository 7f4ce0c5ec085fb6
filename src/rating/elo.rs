//! Elo rating system implementation
//!
//! Pairwise updates use the logistic expected score
//! `E_A = 1 / (1 + 10^((R_B - R_A) / 400))`. Multiplayer updates generalize it
//! to the field: `E_i = Q_i / sum(Q)` with `Q_i = 10^((R_i - R_max) / 400)`,
//! and only the winner scores 1.
//!
//! New ratings are `round(R + K * (S - E))`, rounding halves up.

use crate::config::rating::EloConfig;
use crate::error::EloError;
use crate::rating::calculator::RatingCalculator;
use crate::types::{CompetitorId, Outcome, Rating, RatingSet};
use crate::utils::round_half_up;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Expected score of `rating` against a single `opponent`
pub fn expected_score(rating: Rating, opponent: Rating) -> f64 {
    let exponent = (f64::from(opponent) - f64::from(rating)) / 400.0;
    1.0 / (1.0 + 10f64.powf(exponent))
}

/// Expected score of every competitor against the whole field
///
/// The scores of a non-empty field sum to 1. Strengths are taken relative to
/// the strongest competitor, so the largest term is 1 and the total never
/// overflows or vanishes for any `i32` rating.
pub fn field_expected_scores(ratings: &RatingSet) -> HashMap<CompetitorId, f64> {
    let Some(top) = ratings.values().max().copied() else {
        return HashMap::new();
    };

    let strengths: Vec<(CompetitorId, f64)> = ratings
        .iter()
        .map(|(id, rating)| {
            let exponent = (f64::from(*rating) - f64::from(top)) / 400.0;
            (*id, 10f64.powf(exponent))
        })
        .collect();
    let total: f64 = strengths.iter().map(|(_, q)| q).sum();

    strengths
        .into_iter()
        .map(|(id, q)| (id, q / total))
        .collect()
}

/// `round(rating + k * (actual - expected))`
pub fn apply_score(rating: Rating, k: u32, actual: f64, expected: f64) -> Rating {
    round_half_up(f64::from(rating) + f64::from(k) * (actual - expected))
}

/// Elo rating calculator
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// K-factor applied by the update operations
    pub fn k_factor(&self) -> u32 {
        self.config.k_factor
    }

    /// Multiplayer update with an explicit K-factor
    pub fn update_multiplayer_with_k(
        &self,
        ratings: &RatingSet,
        winner: CompetitorId,
        k: u32,
    ) -> RatingSet {
        if ratings.is_empty() {
            return ratings.clone();
        }

        if !ratings.contains_key(&winner) {
            warn!(
                "Winner {} not in rating set, scoring all {} competitors as non-winners",
                winner,
                ratings.len()
            );
        }

        let expected = field_expected_scores(ratings);

        let updated: RatingSet = ratings
            .iter()
            .map(|(id, rating)| {
                let actual = if *id == winner { 1.0 } else { 0.0 };
                (*id, apply_score(*rating, k, actual, expected[id]))
            })
            .collect();

        debug!(
            "Multiplayer update: {} competitors, winner {}, K={}",
            ratings.len(),
            winner,
            k
        );

        updated
    }

    /// Two-player update for competitor A with an explicit K-factor
    pub fn update_pair_rating_with_k(
        &self,
        rating_a: Rating,
        rating_b: Rating,
        outcome: Outcome,
        k: u32,
    ) -> Rating {
        let actual = self.config.scores.score(outcome);
        let expected = expected_score(rating_a, rating_b);
        let new_rating = apply_score(rating_a, k, actual, expected);

        debug!(
            "Pair update: {} vs {} ({}), expected {:.4}, K={} -> {}",
            rating_a, rating_b, outcome, expected, k, new_rating
        );

        new_rating
    }

    /// Update both sides of a two-player game
    ///
    /// B is updated with the reversed outcome. With the default score table a
    /// loss scores 0.5, so the two deltas do not cancel.
    pub fn update_pair(
        &self,
        rating_a: Rating,
        rating_b: Rating,
        outcome: Outcome,
    ) -> (Rating, Rating) {
        (
            self.update_pair_rating(rating_a, rating_b, outcome),
            self.update_pair_rating(rating_b, rating_a, outcome.reversed()),
        )
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn update_multiplayer(&self, ratings: &RatingSet, winner: CompetitorId) -> RatingSet {
        self.update_multiplayer_with_k(ratings, winner, self.config.k_factor)
    }

    fn update_pair_rating(&self, rating_a: Rating, rating_b: Rating, outcome: Outcome) -> Rating {
        self.update_pair_rating_with_k(rating_a, rating_b, outcome, self.config.k_factor)
    }

    fn determine_k(&self, rating: Rating) -> u32 {
        self.config.k_factor_table.lookup(rating)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: EloConfig =
            serde_json::from_value(config).map_err(|e| EloError::ConfigurationError {
                message: format!("Invalid Elo configuration: {}", e),
            })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::k_factor::{KFactorTable, KFactorTier};

    fn calculator() -> EloRatingCalculator {
        EloRatingCalculator::new(EloConfig::default()).unwrap()
    }

    #[test]
    fn test_expected_score() {
        assert_eq!(expected_score(1500, 1500), 0.5);
        assert!((expected_score(1600, 1400) - 0.7597).abs() < 1e-4);
        assert!((expected_score(1400, 1600) - 0.2403).abs() < 1e-4);
        assert!((expected_score(1600, 1400) + expected_score(1400, 1600) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_expected_scores() {
        let ratings = RatingSet::from([(1, 1500), (2, 1500), (3, 1500)]);
        let expected = field_expected_scores(&ratings);
        for id in [1, 2, 3] {
            assert!((expected[&id] - 1.0 / 3.0).abs() < 1e-12);
        }

        let ratings = RatingSet::from([(1, 1600), (2, 1400)]);
        let expected = field_expected_scores(&ratings);
        assert!((expected[&1] - expected_score(1600, 1400)).abs() < 1e-12);
        assert!((expected[&1] + expected[&2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_win_scenario() {
        assert_eq!(calculator().update_pair_rating(1600, 1400, Outcome::Win), 1608);
    }

    #[test]
    fn test_pair_loss_scores_like_draw() {
        let calc = calculator();
        assert_eq!(calc.update_pair_rating(1400, 1600, Outcome::Loss), 1408);
        assert_eq!(
            calc.update_pair_rating(1400, 1600, Outcome::Loss),
            calc.update_pair_rating(1400, 1600, Outcome::Draw)
        );
    }

    #[test]
    fn test_pair_draw_equal_ratings() {
        let calc = calculator();
        for rating in [-300, 0, 1200, 1500, 2850] {
            assert_eq!(calc.update_pair_rating(rating, rating, Outcome::Draw), rating);
        }
    }

    #[test]
    fn test_pair_unrecognized_token() {
        assert_eq!(calculator().update_pair_rating_token(1500, 1600, "?"), 1500);
    }

    #[test]
    fn test_pair_conventional_loss() {
        let calc = EloRatingCalculator::new(EloConfig::conventional()).unwrap();
        // 1400 + 32 * (0 - 0.2403) = 1392.31
        assert_eq!(calc.update_pair_rating(1400, 1600, Outcome::Loss), 1392);
        assert_eq!(calc.update_pair(1500, 1500, Outcome::Win), (1516, 1484));
    }

    #[test]
    fn test_update_pair_default_not_zero_sum() {
        let (a, b) = calculator().update_pair(1500, 1500, Outcome::Win);
        assert_eq!(a, 1516);
        // B loses but scores 0.5 against an expectation of 0.5
        assert_eq!(b, 1500);
    }

    #[test]
    fn test_pair_with_explicit_k() {
        let calc = calculator();
        // 2500 + 16 * (1 - 0.5)
        assert_eq!(calc.update_pair_rating_with_k(2500, 2500, Outcome::Win, 16), 2508);
        assert_eq!(
            calc.update_pair_rating_with_k(1600, 1400, Outcome::Win, 32),
            calc.update_pair_rating(1600, 1400, Outcome::Win)
        );
    }

    #[test]
    fn test_multiplayer_three_way() {
        let ratings = RatingSet::from([(1, 1500), (2, 1500), (3, 1500)]);
        let result = calculator().update_multiplayer(&ratings, 1);

        assert_eq!(result.len(), 3);
        assert_eq!(result[&1], 1521);
        assert_eq!(result[&2], 1489);
        assert_eq!(result[&3], 1489);
        // Input untouched
        assert_eq!(ratings[&1], 1500);
    }

    #[test]
    fn test_multiplayer_empty() {
        let result = calculator().update_multiplayer(&RatingSet::new(), 42);
        assert!(result.is_empty());
    }

    #[test]
    fn test_multiplayer_missing_winner() {
        let ratings = RatingSet::from([(1, 1500), (2, 1500), (3, 1500)]);
        let result = calculator().update_multiplayer(&ratings, 99);

        assert_eq!(result.len(), 3);
        assert!(result.values().all(|rating| *rating == 1489));
    }

    #[test]
    fn test_field_expected_scores_extreme_ratings() {
        for ratings in [
            RatingSet::from([(1, 130_000), (2, 130_000)]),
            RatingSet::from([(1, -130_000), (2, -130_000)]),
            RatingSet::from([(1, Rating::MAX), (2, Rating::MIN), (3, 0)]),
        ] {
            let expected = field_expected_scores(&ratings);
            assert!(expected.values().all(|e| e.is_finite()));
            assert!((expected.values().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert!(field_expected_scores(&RatingSet::new()).is_empty());
    }

    #[test]
    fn test_multiplayer_extreme_ratings() {
        let calc = calculator();

        let high = RatingSet::from([(1, 130_000), (2, 130_000)]);
        let result = calc.update_multiplayer(&high, 1);
        assert_eq!(result[&1], calc.update_pair_rating(130_000, 130_000, Outcome::Win));
        assert_eq!(result[&1], 130_016);
        assert_eq!(result[&2], 129_984);

        let low = RatingSet::from([(1, -130_000), (2, -130_000)]);
        let result = calc.update_multiplayer(&low, 1);
        assert_eq!(result[&1], -129_984);
        assert_eq!(result[&2], -130_016);

        // The bottom competitor has no chance against the field
        let spread = RatingSet::from([(1, Rating::MIN), (2, 0)]);
        let result = calc.update_multiplayer(&spread, 1);
        assert_eq!(result[&1], Rating::MIN + 32);
        assert_eq!(result[&2], -32);
    }

    #[test]
    fn test_multiplayer_two_players_matches_pairwise_win() {
        let calc = calculator();
        let ratings = RatingSet::from([(1, 1600), (2, 1400)]);
        let result = calc.update_multiplayer(&ratings, 1);

        assert_eq!(result[&1], calc.update_pair_rating(1600, 1400, Outcome::Win));
        // 1400 + 32 * (0 - 0.2403)
        assert_eq!(result[&2], 1392);
    }

    #[test]
    fn test_multiplayer_ignores_k_factor_table() {
        let config = EloConfig {
            k_factor_table: KFactorTable {
                tiers: vec![KFactorTier { below: 3000, k: 4 }],
                floor: 2,
            },
            ..EloConfig::default()
        };
        let calc = EloRatingCalculator::new(config).unwrap();
        let ratings = RatingSet::from([(1, 1500), (2, 1500), (3, 1500)]);

        assert_eq!(calc.determine_k(1500), 4);
        assert_eq!(calc.update_multiplayer(&ratings, 1)[&1], 1521);
    }

    #[test]
    fn test_multiplayer_with_explicit_k() {
        let ratings = RatingSet::from([(1, 1500), (2, 1500), (3, 1500)]);
        let result = calculator().update_multiplayer_with_k(&ratings, 1, 24);
        // 1500 + 24 * 2/3 = 1516, 1500 - 24/3 = 1492
        assert_eq!(result[&1], 1516);
        assert_eq!(result[&2], 1492);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EloConfig {
            k_factor: 0,
            ..EloConfig::default()
        };
        assert!(EloRatingCalculator::new(config).is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let mut calc = calculator();
        let mut json = calc.config();
        assert_eq!(json["k_factor"], 32);

        json["k_factor"] = serde_json::json!(20);
        json["scores"]["loss"] = serde_json::json!(0.0);
        calc.update_config(json).unwrap();

        assert_eq!(calc.k_factor(), 20);
        assert_eq!(calc.update_pair_rating(1500, 1500, Outcome::Loss), 1490);
    }

    #[test]
    fn test_update_config_rejects_invalid() {
        let mut calc = calculator();
        assert!(calc.update_config(serde_json::json!({ "k_factor": 0 })).is_err());
        assert!(calc.update_config(serde_json::json!({ "k_factor": "high" })).is_err());
        assert_eq!(calc.k_factor(), 32);
    }
}
