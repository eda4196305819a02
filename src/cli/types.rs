//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::render::RenderArgs;
use crate::cli::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(name = "netbox-env")]
#[command(about = "Build NetBox settings from environment variables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Tool configuration file (YAML)
    #[arg(short, long, global = true, env = "NETBOX_ENV_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the settings namespace as a Python module or JSON
    Render(RenderArgs),

    /// Load the settings and report whether the environment is valid
    Check(CheckArgs),

    /// Show every setting with its effective value
    Show(ShowArgs),
}
