//! Dispatches parsed arguments to the command handlers.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, locate::locate, preview::preview, watch::watch},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Preview(cmd)) => preview(cmd),
        Some(Command::Watch(cmd)) => watch(cmd),
        Some(Command::Locate(cmd)) => locate(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
