//! Implementation of the `netbox-env check` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::display::{action_failure, action_success, output, CommandOutput};
use crate::domain::models::NetBoxSettings;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// KEY=VALUE file layered over the process environment
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub allowed_hosts: Vec<String>,
    pub plugins: usize,
    pub debug: bool,
    pub warnings: Vec<String>,
}

impl CheckOutput {
    fn from_settings(settings: &NetBoxSettings) -> Self {
        Self {
            success: true,
            allowed_hosts: settings.allowed_hosts.clone(),
            plugins: settings.plugins.len(),
            debug: settings.debug,
            warnings: warnings(settings),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![action_success("Environment produces valid NetBox settings")];
        lines.push(format!("  allowed hosts: {}", self.allowed_hosts.join(", ")));
        lines.push(format!("  plugins: {}", self.plugins));
        for warning in &self.warnings {
            lines.push(action_failure(warning));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Non-fatal observations about a loaded configuration.
///
/// NetBox itself refuses to start without a secret key, so its absence is
/// reported even though loading succeeds.
pub fn warnings(settings: &NetBoxSettings) -> Vec<String> {
    let mut warnings = Vec::new();
    if settings.secret_key.is_empty() {
        warnings.push("SECRET_KEY is empty; NetBox will refuse to start".to_string());
    } else if settings.secret_key.chars().count() < 50 {
        warnings.push("SECRET_KEY is shorter than 50 characters".to_string());
    }
    if settings.debug {
        warnings.push("DEBUG is enabled".to_string());
    }
    if !settings.plugins.is_empty() && !settings.plugins_enabled {
        warnings.push("PLUGINS is set but PLUGINS_ENABLED is false".to_string());
    }
    warnings
}

pub fn execute(args: CheckArgs, json_mode: bool) -> Result<()> {
    let settings = super::load_settings(args.env_file.as_deref())?;
    let result = CheckOutput::from_settings(&settings);
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_for_defaults() {
        let warnings = warnings(&NetBoxSettings::default());
        assert_eq!(warnings, vec!["SECRET_KEY is empty; NetBox will refuse to start"]);
    }

    #[test]
    fn test_warnings_for_risky_settings() {
        let settings = NetBoxSettings {
            secret_key: "short".to_string(),
            debug: true,
            plugins: vec!["netbox_bgp".to_string()],
            ..NetBoxSettings::default()
        };
        let warnings = warnings(&settings);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("shorter than 50"));
    }

    #[test]
    fn test_no_warnings_for_production_settings() {
        let settings = NetBoxSettings {
            secret_key: "x".repeat(50),
            plugins: vec!["netbox_bgp".to_string()],
            plugins_enabled: true,
            ..NetBoxSettings::default()
        };
        assert!(warnings(&settings).is_empty());
    }
}
