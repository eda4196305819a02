//! netbox-env - environment-driven NetBox settings
//!
//! Reads process environment variables, coerces them into a typed NetBox
//! settings namespace with documented defaults, and renders that namespace
//! as the `configuration.py` module NetBox imports at startup.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): settings model, environment port, errors
//! - **Service Layer** (`services`): assembling settings from an environment
//! - **Infrastructure Layer** (`infrastructure`): env sources, coercion,
//!   renderers, logging, tool configuration
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use netbox_env::{MapEnv, SettingsLoader};
//!
//! let env = MapEnv::new().with("REDIS_TASKS_PORT", "6380");
//! let settings = SettingsLoader::load(env).unwrap();
//! assert_eq!(settings.redis.tasks.port, 6380);
//! assert_eq!(settings.redis.caching.port, 6379);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Admin, DatabaseSettings, EmailSettings, NetBoxSettings, OriginPattern, RedisConnection,
    RedisSettings, ToolConfig,
};
pub use domain::{EnvSource, PatternError, SettingsError, SettingsResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::env::{EnvReader, LayeredEnv, MapEnv, ProcessEnv};
pub use infrastructure::render::{render_json, render_module, RenderFormat};
pub use services::SettingsLoader;
