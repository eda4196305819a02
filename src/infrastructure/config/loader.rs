use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::ToolConfig;
use crate::infrastructure::render::RenderFormat;

/// Project-local configuration file picked up when present.
pub const DEFAULT_CONFIG_FILE: &str = "netbox-env.yaml";

/// Prefix for environment overrides of the tool configuration.
pub const ENV_PREFIX: &str = "NETBOX_ENV_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid output format: {0}. Must be one of: python, json")]
    InvalidOutputFormat(String),

    #[error("Configuration file not found: {0}")]
    MissingFile(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ./netbox-env.yaml (optional)
    /// 3. `path`, when given (must exist)
    /// 4. Environment variables (NETBOX_ENV_* prefix, `__` for nesting)
    pub fn load(path: Option<&Path>) -> Result<ToolConfig> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.display().to_string()).into());
            }
        }

        let config: ToolConfig = Self::figment(path)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The provider stack used by [`ConfigLoader::load`].
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(ToolConfig::default()))
            .merge(Yaml::file(DEFAULT_CONFIG_FILE));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &ToolConfig) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.output.format.parse::<RenderFormat>().is_err() {
            return Err(ConfigError::InvalidOutputFormat(config.output.format.clone()));
        }

        Ok(())
    }
}
