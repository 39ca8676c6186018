use std::{env, fs};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::InitCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config into the project root, never over an existing one.
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let root = match cmd.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("Project root not found: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let content = format!("{}\n", default_config_json()?);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "wrote default config");

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
