//! Common types used throughout the rating calculator

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Opaque identifier for a competitor, unique within one call
pub type CompetitorId = i64;

/// Integer skill rating. No range is enforced.
pub type Rating = i32;

/// Current or updated ratings keyed by competitor
pub type RatingSet = HashMap<CompetitorId, Rating>;

/// Result of a two-player game from the first competitor's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Parse an outcome token: exactly `+`, `=` or `-`.
    ///
    /// Anything else, including names and padded tokens, is unrecognized.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Outcome::Win),
            "=" => Some(Outcome::Draw),
            "-" => Some(Outcome::Loss),
            _ => None,
        }
    }

    /// The same game seen from the opponent's side
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// Lenient parsing for user input: the exact tokens, plus `win`, `draw` and
/// `loss` in any case, ignoring surrounding whitespace
impl FromStr for Outcome {
    type Err = crate::error::EloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Outcome::from_token(trimmed)
            .or_else(|| match trimmed.to_ascii_lowercase().as_str() {
                "win" => Some(Outcome::Win),
                "draw" => Some(Outcome::Draw),
                "loss" => Some(Outcome::Loss),
                _ => None,
            })
            .ok_or_else(|| crate::error::EloError::InvalidOutcome {
                token: s.to_string(),
            })
    }
}

/// Rating change information for a competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub competitor_id: CompetitorId,
    pub old_rating: Rating,
    pub new_rating: Rating,
    pub delta: i64, // new_rating - old_rating
}

impl RatingChange {
    pub fn new(competitor_id: CompetitorId, old_rating: Rating, new_rating: Rating) -> Self {
        Self {
            competitor_id,
            old_rating,
            new_rating,
            delta: i64::from(new_rating) - i64::from(old_rating),
        }
    }
}
