//! Command-line front end: `keyfill init | status | translate`.

use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command, CommonArgs, InitCommand, StatusCommand, TranslateCommand};
pub use exit_status::ExitStatus;

use commands::{init::init, status::status, translate::translate};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    init_tracing(args.verbose());

    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Init(cmd)) => init(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "keyfill=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
