//! Rating calculator trait
//!
//! This module defines the interface for rating calculations. The lenient
//! operations never fail; the `try_` variants are an opt-in strict mode built
//! on top of them.

use crate::error::EloError;
use crate::types::{CompetitorId, Outcome, Rating, RatingSet};
use tracing::warn;

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Update every rating after a multiplayer game with a single winner
    ///
    /// # Arguments
    /// * `ratings` - Current rating of every competitor in the game
    /// * `winner` - The competitor credited with the win
    ///
    /// # Returns
    /// A new rating set with exactly the keys of `ratings`. An empty input is
    /// returned unchanged. A winner that is not in `ratings` is not an error:
    /// every competitor is then scored as a non-winner.
    fn update_multiplayer(&self, ratings: &RatingSet, winner: CompetitorId) -> RatingSet;

    /// New rating for competitor A after a two-player game
    fn update_pair_rating(&self, rating_a: Rating, rating_b: Rating, outcome: Outcome) -> Rating;

    /// K-factor for a rating. Not consulted by the update operations.
    fn determine_k(&self, rating: Rating) -> u32;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;

    /// Strict multiplayer update
    ///
    /// Fails on an empty rating set or a winner missing from it; otherwise
    /// identical to [`RatingCalculator::update_multiplayer`].
    fn try_update_multiplayer(
        &self,
        ratings: &RatingSet,
        winner: CompetitorId,
    ) -> crate::error::Result<RatingSet> {
        if ratings.is_empty() {
            return Err(EloError::EmptyRatingSet.into());
        }

        if !ratings.contains_key(&winner) {
            return Err(EloError::WinnerNotFound { winner }.into());
        }

        Ok(self.update_multiplayer(ratings, winner))
    }

    /// Two-player update from a raw outcome token
    ///
    /// Only the exact tokens `+`, `=` and `-` are recognized; see
    /// [`Outcome::from_token`]. Anything else, including `"win"`, leaves
    /// `rating_a` unchanged. Parse user input with `str::parse::<Outcome>`
    /// first to accept outcome names.
    fn update_pair_rating_token(
        &self,
        rating_a: Rating,
        rating_b: Rating,
        token: &str,
    ) -> Rating {
        match Outcome::from_token(token) {
            Some(outcome) => self.update_pair_rating(rating_a, rating_b, outcome),
            None => {
                warn!("Unrecognized outcome {:?}, rating left unchanged", token);
                rating_a
            }
        }
    }

    /// Strict variant of [`RatingCalculator::update_pair_rating_token`]
    fn try_update_pair_rating_token(
        &self,
        rating_a: Rating,
        rating_b: Rating,
        token: &str,
    ) -> crate::error::Result<Rating> {
        let outcome = Outcome::from_token(token).ok_or_else(|| EloError::InvalidOutcome {
            token: token.to_string(),
        })?;
        Ok(self.update_pair_rating(rating_a, rating_b, outcome))
    }
}
