//! Main application configuration
//!
//! This module defines the primary configuration structures for the elo-ladder
//! service, including environment variable loading and validation.

use crate::config::rating::RatingSettings;
use crate::rating::EloConfig;
use crate::session::{ConversationConfig, DEFAULT_MAX_FILE_SIZE_MB};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub transport: TransportSettings,
    pub rating: RatingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Chat transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Upload size limit in megabytes
    pub max_file_size_mb: u64,
    /// Directory that receives documents sent back to the user
    pub output_dir: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            output_dir: PathBuf::from("."),
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
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Transport settings
        if let Ok(limit) = env::var("MAX_FILE_SIZE_MB") {
            self.transport.max_file_size_mb = limit
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_FILE_SIZE_MB value: {}", limit))?;
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            self.transport.output_dir = PathBuf::from(dir);
        }

        // Rating settings
        if let Ok(k) = env::var("RATING_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k))?;
        }
        if let Ok(hca) = env::var("RATING_HOME_ADVANTAGE") {
            self.rating.home_advantage = hca
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_HOME_ADVANTAGE value: {}", hca))?;
        }
        if let Ok(initial) = env::var("RATING_INITIAL") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_INITIAL value: {}", initial))?;
        }

        Ok(())
    }

    /// Elo parameters for a rating engine
    pub fn elo_config(&self) -> EloConfig {
        EloConfig::from(&self.rating)
    }

    /// Settings for a chat conversation
    pub fn conversation_config(&self) -> ConversationConfig {
        ConversationConfig {
            max_file_size_mb: self.transport.max_file_size_mb,
            rating: self.elo_config(),
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate transport settings
    if config.transport.max_file_size_mb == 0 {
        return Err(anyhow!("Max file size must be greater than 0"));
    }

    // Validate rating settings
    config.elo_config().validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.rating.k_factor, 100.0);
        assert_eq!(config.rating.home_advantage, 0.0);
        assert_eq!(config.rating.initial_rating, 1500);
        assert_eq!(config.transport.max_file_size_mb, 5);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_rating_settings() {
        let mut config = AppConfig::default();
        config.rating.k_factor = -1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_file_limit() {
        let mut config = AppConfig::default();
        config.transport.max_file_size_mb = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_transport_settings_from_toml() {
        let serialized = toml::to_string(&AppConfig::default()).unwrap();
        assert!(!serialized.contains("token"));

        let config: AppConfig = toml::from_str(
            r#"
            [transport]
            output_dir = "results"
            "#,
        )
        .unwrap();
        assert_eq!(config.transport.output_dir, PathBuf::from("results"));
        assert_eq!(config.transport.max_file_size_mb, 5);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [rating]
            k_factor = 32.0

            [transport]
            max_file_size_mb = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.rating.initial_rating, 1500);
        assert_eq!(config.transport.max_file_size_mb, 2);
        assert_eq!(config.service.name, "elo-ladder");
        assert_eq!(config.conversation_config().rating.k_factor, 32.0);
    }
}
