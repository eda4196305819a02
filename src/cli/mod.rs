//! Command-line interface.

pub mod commands;
pub mod display;
pub mod types;

pub use types::{Cli, Commands};

use crate::infrastructure::logging::SecretScrubber;

/// Report a command failure on stderr and exit with status 1.
///
/// The full error chain is printed so the offending variable is visible;
/// credentials are scrubbed from the message.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let message = SecretScrubber::new().scrub_message(&format!("{err:#}"));
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": message });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{}", display::action_failure(&message));
    }
    std::process::exit(1);
}
