//! Command-line host for the annotation engine.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: one module per subcommand
//! - `exit_status`: process exit codes
//! - `report`: colored terminal rendering of annotated files

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod args;
mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "GHOSTLENS_LOG";

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    init_logging(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}

/// Install the stderr subscriber. `GHOSTLENS_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "ghostlens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second call (e.g. from tests driving `run_cli`) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
