//! K-factor lookup
//!
//! The K-factor table is a standalone utility. Neither update operation
//! consults it; callers that want a rating-dependent K look it up here and
//! pass it explicitly.

use crate::error::EloError;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// K-factor for ratings below [`INTERMEDIATE_THRESHOLD`]
pub const DEVELOPING_K: u32 = 32;

/// K-factor for ratings in `[INTERMEDIATE_THRESHOLD, MASTER_THRESHOLD)`
pub const INTERMEDIATE_K: u32 = 24;

/// K-factor for ratings at or above [`MASTER_THRESHOLD`]
pub const MASTER_K: u32 = 16;

/// Lowest rating that uses [`INTERMEDIATE_K`]
pub const INTERMEDIATE_THRESHOLD: Rating = 2000;

/// Lowest rating that uses [`MASTER_K`]
pub const MASTER_THRESHOLD: Rating = 2400;

/// Determine the K-factor for a rating using the standard table
///
/// * rating < 2000 -> 32
/// * 2000 <= rating < 2400 -> 24
/// * rating >= 2400 -> 16
pub fn determine_k(rating: Rating) -> u32 {
    if rating < INTERMEDIATE_THRESHOLD {
        DEVELOPING_K
    } else if rating < MASTER_THRESHOLD {
        INTERMEDIATE_K
    } else {
        MASTER_K
    }
}

/// One row of a K-factor table: ratings strictly below `below` use `k`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFactorTier {
    pub below: Rating,
    pub k: u32,
}

/// Tiered K-factor table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFactorTable {
    /// Tiers in strictly ascending `below` order
    pub tiers: Vec<KFactorTier>,
    /// K-factor for ratings at or above the last tier
    pub floor: u32,
}

impl Default for KFactorTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                KFactorTier {
                    below: INTERMEDIATE_THRESHOLD,
                    k: DEVELOPING_K,
                },
                KFactorTier {
                    below: MASTER_THRESHOLD,
                    k: INTERMEDIATE_K,
                },
            ],
            floor: MASTER_K,
        }
    }
}

impl KFactorTable {
    /// Look up the K-factor for a rating
    pub fn lookup(&self, rating: Rating) -> u32 {
        self.tiers
            .iter()
            .find(|tier| rating < tier.below)
            .map(|tier| tier.k)
            .unwrap_or(self.floor)
    }

    /// Validate table shape
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.floor == 0 || self.tiers.iter().any(|tier| tier.k == 0) {
            return Err(EloError::ConfigurationError {
                message: "K-factor tiers must have a positive K".to_string(),
            }
            .into());
        }

        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].below >= pair[1].below)
        {
            return Err(EloError::ConfigurationError {
                message: "K-factor tiers must be in strictly ascending order".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
