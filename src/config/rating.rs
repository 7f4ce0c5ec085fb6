//! Rating system configuration

use crate::error::EloError;
use crate::rating::k_factor::KFactorTable;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// K-factor used by both update operations unless configured otherwise
pub const DEFAULT_K_FACTOR: u32 = 32;

/// Actual score credited for each pairwise outcome
///
/// The default scores a loss the same as a draw (0.5). Use
/// [`ScoreTable::conventional`] for the usual 1 / 0.5 / 0 table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: 0.5,
        }
    }
}

impl ScoreTable {
    /// Win 1, draw 0.5, loss 0
    pub fn conventional() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: 0.0,
        }
    }

    /// Actual score for an outcome
    pub fn score(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        }
    }
}

/// Elo calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EloConfig {
    /// K-factor applied by the update operations
    pub k_factor: u32,
    /// Pairwise outcome scores
    pub scores: ScoreTable,
    /// Table consulted only by `determine_k`
    pub k_factor_table: KFactorTable,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            scores: ScoreTable::default(),
            k_factor_table: KFactorTable::default(),
        }
    }
}

impl EloConfig {
    /// Default configuration with a loss scored as 0
    pub fn conventional() -> Self {
        Self {
            scores: ScoreTable::conventional(),
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor == 0 {
            return Err(EloError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        for (name, score) in [
            ("win", self.scores.win),
            ("draw", self.scores.draw),
            ("loss", self.scores.loss),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(EloError::ConfigurationError {
                    message: format!("{} score must be between 0 and 1, got {}", name, score),
                }
                .into());
            }
        }

        self.k_factor_table.validate()
    }
}
