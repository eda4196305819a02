//! Environment access
//!
//! - `EnvSource` adapters: process environment, in-memory maps, overlays
//! - `EnvReader`: typed get-or-default coercions

pub mod reader;
pub mod source;

pub use reader::{is_truthy, EnvReader, ADMIN_SEPARATOR, TRUTHY_TOKENS};
pub use source::{LayeredEnv, MapEnv, ProcessEnv};
