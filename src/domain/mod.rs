//! Domain layer for netbox-env
//!
//! Typed settings model, the environment source port, and the errors raised
//! while loading settings.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{PatternError, SettingsError, SettingsResult};
pub use ports::EnvSource;
