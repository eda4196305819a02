//! Settings renderers
//!
//! - `python`: a `configuration.py` module NetBox imports at startup
//! - `json`: the same namespace as a JSON document

pub mod json;
pub mod python;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::models::NetBoxSettings;

pub use json::render_json;
pub use python::render_module;

/// Output format for rendered settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Python,
    Json,
}

impl RenderFormat {
    /// Render `settings` in this format.
    pub fn render(self, settings: &NetBoxSettings) -> serde_json::Result<String> {
        match self {
            Self::Python => render_module(settings),
            Self::Json => render_json(settings, true),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown render format: {other}")),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => f.write_str("python"),
            Self::Json => f.write_str("json"),
        }
    }
}
