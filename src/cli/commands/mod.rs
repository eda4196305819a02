//! CLI command implementations.

pub mod check;
pub mod render;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::models::NetBoxSettings;
use crate::infrastructure::env::{LayeredEnv, MapEnv, ProcessEnv};
use crate::services::SettingsLoader;

/// Load settings from the process environment, with `env_file` (when given)
/// taking precedence over it.
pub fn load_settings(env_file: Option<&Path>) -> Result<NetBoxSettings> {
    let mut source = LayeredEnv::new();
    if let Some(path) = env_file {
        let overlay = MapEnv::from_file(path)?;
        tracing::info!(path = %path.display(), variables = overlay.len(), "loaded env file");
        source = source.then(overlay);
    }
    source = source.then(ProcessEnv);

    SettingsLoader::load(source).context("Failed to load NetBox settings from the environment")
}
