//! netbox-env CLI entry point.

use anyhow::Result;
use clap::Parser;

use netbox_env::cli::{commands, Cli, Commands};
use netbox_env::infrastructure::config::ConfigLoader;
use netbox_env::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json) {
        netbox_env::cli::handle_error(&err, cli.json);
    }
}

fn run(command: Commands, config_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match command {
        Commands::Render(args) => commands::render::execute(args, &config, json),
        Commands::Check(args) => commands::check::execute(args, json),
        Commands::Show(args) => commands::show::execute(args, &config, json),
    }
}
