//! Implementation of the `netbox-env show` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{NetBoxSettings, ToolConfig};
use crate::infrastructure::logging::SecretScrubber;
use crate::infrastructure::render::python::literal;

/// Structured settings whose members are listed as individual rows.
const EXPANDED: [&str; 3] = ["DATABASE", "REDIS", "EMAIL"];

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// KEY=VALUE file layered over the process environment
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,

    /// Print passwords and keys instead of redacting them
    #[arg(long)]
    pub reveal_secrets: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ShowOutput {
    pub settings: Value,
    pub redacted: bool,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let rows = rows(&self.settings);
        let mut table = list_table(&["setting", "value"]);
        for (name, value) in &rows {
            table.add_row(vec![name.as_str(), value.as_str()]);
        }
        render_list("setting", &table, rows.len())
    }

    fn to_json(&self) -> serde_json::Value {
        self.settings.clone()
    }
}

impl ShowOutput {
    pub fn new(settings: &NetBoxSettings, redact: bool) -> Result<Self> {
        let mut value = serde_json::to_value(settings).context("Failed to serialize settings")?;
        if redact {
            SecretScrubber::new().redact_value(&mut value);
        }
        Ok(Self {
            settings: value,
            redacted: redact,
        })
    }
}

/// Flatten the namespace into `(dotted name, Python literal)` rows.
pub fn rows(settings: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    let Value::Object(map) = settings else {
        return rows;
    };
    for (key, value) in map {
        if EXPANDED.contains(&key.as_str()) {
            flatten(key, value, &mut rows);
        } else {
            rows.push((key.clone(), compact_literal(value)));
        }
    }
    rows
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, item) in map {
                flatten(&format!("{prefix}.{key}"), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), compact_literal(value))),
    }
}

fn compact_literal(value: &Value) -> String {
    match value {
        Value::Object(map) if !map.is_empty() => value.to_string(),
        _ => literal(value),
    }
}

pub fn execute(args: ShowArgs, config: &ToolConfig, json_mode: bool) -> Result<()> {
    let settings = super::load_settings(args.env_file.as_deref())?;
    let redact = config.output.redact_secrets && !args.reveal_secrets;
    output(&ShowOutput::new(&settings, redact)?, json_mode);
    Ok(())
}
