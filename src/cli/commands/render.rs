//! Implementation of the `netbox-env render` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::display::{action_success, output, CommandOutput};
use crate::domain::models::ToolConfig;
use crate::infrastructure::render::RenderFormat;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output format (defaults to the configured output format)
    #[arg(short, long, value_enum)]
    pub format: Option<RenderFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// KEY=VALUE file layered over the process environment
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
pub struct RenderOutput {
    pub success: bool,
    pub format: RenderFormat,
    pub path: PathBuf,
    pub bytes: usize,
}

impl CommandOutput for RenderOutput {
    fn to_human(&self) -> String {
        action_success(&format!(
            "Wrote {} settings ({} bytes) to {}",
            self.format,
            self.bytes,
            self.path.display()
        ))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: RenderArgs, config: &ToolConfig, json_mode: bool) -> Result<()> {
    let format = match args.format {
        Some(format) => format,
        None => config
            .output
            .format
            .parse()
            .map_err(anyhow::Error::msg)?,
    };

    let settings = super::load_settings(args.env_file.as_deref())?;
    let rendered = format
        .render(&settings)
        .with_context(|| format!("Failed to render settings as {format}"))?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), %format, "settings rendered");
            let result = RenderOutput {
                success: true,
                format,
                path,
                bytes: rendered.len(),
            };
            output(&result, json_mode);
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
