use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Server base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid server base_url '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("Credential slot name cannot be empty")]
    EmptySlot,

    #[error("Credential storage path cannot be empty")]
    EmptyStoragePath,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .bucket/config.yaml
    /// 3. .bucket/local.yaml (optional local overrides)
    /// 4. Environment variables (BUCKET_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with `root` as the project directory
    pub fn load_from(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(".bucket");
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("BUCKET_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if let Err(err) = reqwest::Url::parse(base_url) {
            return Err(ConfigError::InvalidBaseUrl(
                config.server.base_url.clone(),
                err.to_string(),
            ));
        }

        if config.credentials.slot.is_empty() {
            return Err(ConfigError::EmptySlot);
        }
        if config.credentials.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStoragePath);
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
