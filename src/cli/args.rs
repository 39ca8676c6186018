//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: Create a `.keyfillrc.json` with default settings
//! - `status`: List untranslated (and optionally translated) key occurrences
//! - `translate`: Fill untranslated keys through the configured backend

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::TranslateMode;

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
            Some(Command::Status(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by `status` and `translate`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root to scan (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Translation file path (overrides config file)
    #[arg(long)]
    pub translation_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to create the config file in (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only check this file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Also list occurrences whose key is already translated
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Translation backend (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<TranslateMode>,

    /// Target languages, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub langs: Option<Vec<String>>,

    /// Source language (overrides config file)
    #[arg(long)]
    pub from: Option<String>,

    /// List the keys that would be translated without calling the backend
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .keyfillrc.json configuration file
    Init(InitCommand),
    /// Show which translation keys used in source files are missing
    Status(StatusCommand),
    /// Translate missing keys and merge them into the translation file
    Translate(TranslateCommand),
}
