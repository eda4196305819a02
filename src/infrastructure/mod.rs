//! Infrastructure layer module
//!
//! Adapters around the outside world:
//! - Environment sources and typed coercion
//! - Tool configuration (figment)
//! - Logging infrastructure
//! - Settings renderers
//!
//! Implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod env;
pub mod logging;
pub mod render;
