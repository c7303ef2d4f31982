//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `preview`: Print files with translation previews inlined
//! - `watch`: Live preview of one file, refreshed on edits and locale changes
//! - `locate`: Show which locale file would be used
//! - `init`: Initialize a ghostlens configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Preview(cmd)) => cmd.common.verbose,
            Some(Command::Watch(cmd)) => cmd.common.verbose,
            Some(Command::Locate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Locale file relative to the workspace root (overrides config file)
    #[arg(long)]
    pub locale_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Source files to annotate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Source file to keep annotated
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print source files with resolved translations shown after each t('key') call
    Preview(PreviewCommand),
    /// Keep a file previewed, refreshing on edits, locale and config changes
    Watch(WatchCommand),
    /// Show which locale file is used for previews
    Locate(LocateCommand),
    /// Initialize a new .ghostlensrc.json configuration file
    Init,
}
