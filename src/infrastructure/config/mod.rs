//! Configuration of the netbox-env tool itself
//!
//! Hierarchical configuration using figment:
//! - Programmatic defaults
//! - Optional YAML files
//! - Environment variable overrides
//! - Validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX};
