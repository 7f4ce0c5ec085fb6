//! Main application configuration
//!
//! This module defines the configuration used by the `elo-calc` binary,
//! including environment variable loading, TOML file loading and validation.

use crate::config::rating::EloConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: EloConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-calc".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    ///
    /// Validation runs once, on the merged result, so an environment variable
    /// can repair a bad file value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(k) = env::var("ELO_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k))?;
        }
        if let Ok(score) = env::var("ELO_WIN_SCORE") {
            self.rating.scores.win = score
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_WIN_SCORE value: {}", score))?;
        }
        if let Ok(score) = env::var("ELO_DRAW_SCORE") {
            self.rating.scores.draw = score
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_DRAW_SCORE value: {}", score))?;
        }
        if let Ok(score) = env::var("ELO_LOSS_SCORE") {
            self.rating.scores.loss = score
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_LOSS_SCORE value: {}", score))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.log_level, "warn");
        assert_eq!(config.rating, EloConfig::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            log_level = "debug"

            [rating]
            k_factor = 16

            [rating.scores]
            loss = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "elo-calc");
        assert_eq!(config.rating.k_factor, 16);
        assert_eq!(config.rating.scores.loss, 0.0);
        assert_eq!(config.rating.scores.draw, 0.5);
    }

    #[test]
    fn test_from_toml_str_rejects_invalid() {
        assert!(AppConfig::from_toml_str("[service]\nlog_level = \"loud\"").is_err());
        assert!(AppConfig::from_toml_str("[rating]\nk_factor = 0").is_err());
        assert!(AppConfig::from_toml_str("[rating]\nk_factor = \"x\"").is_err());
    }

    // The only test in this binary that touches the process environment
    #[test]
    fn test_from_file_env_overrides_before_validation() {
        let path = env::temp_dir().join(format!("elo-calc-{}-override.toml", std::process::id()));
        std::fs::write(&path, "[rating]\nk_factor = 0\n").unwrap();

        env::set_var("ELO_K_FACTOR", "12");
        let merged = AppConfig::from_file(&path);
        env::remove_var("ELO_K_FACTOR");
        let unmerged = AppConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(merged.unwrap().rating.k_factor, 12);
        assert!(unmerged.is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let path = env::temp_dir().join("elo-calc-does-not-exist.toml");
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_config() {
        let mut config = AppConfig::default();
        config.service.log_level = "INFO".to_string();
        assert!(validate_config(&config).is_ok());

        config.service.name = String::new();
        assert!(validate_config(&config).is_err());
    }
}
