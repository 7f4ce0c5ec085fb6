//! Configuration management for the Elo calculator
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::{EloConfig, ScoreTable, DEFAULT_K_FACTOR};
