//! Shared setup for commands that work on a project.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::CommonArgs;
use crate::{
    config::{Config, load_config, load_config_or_default},
    core::ScanOptions,
};

/// How a config file that fails to load is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPolicy {
    /// Fail the command.
    Strict,
    /// Warn and continue with the defaults.
    Opportunistic,
}

/// Project root, effective configuration and translation file of a command.
///
/// Priority is command line, then config file, then defaults.
#[derive(Debug)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub store_path: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(args: &CommonArgs, policy: ConfigPolicy) -> Result<Self> {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };
        let root = fs::canonicalize(&root)
            .with_context(|| format!("Project root not found: {}", root.display()))?;

        let mut config = match policy {
            ConfigPolicy::Strict => load_config(&root)?.config,
            ConfigPolicy::Opportunistic => {
                let loaded = load_config_or_default(&root);
                if let Some(reason) = &loaded.ignored_error {
                    eprintln!(
                        "{} {} (using default settings)",
                        "warning:".bold().yellow(),
                        reason
                    );
                }
                loaded.config
            }
        };
        if let Some(path) = &args.translation_path {
            config.translation_path = path.to_string_lossy().to_string();
        }
        let store_path = config.translation_file(&root);

        Ok(Self {
            root,
            config,
            store_path,
            verbose: args.verbose,
        })
    }

    pub fn scan_options(&self) -> Result<ScanOptions> {
        ScanOptions::from_config(&self.config)
    }

    /// Canonical path of a file given on the command line.
    pub fn resolve_file(&self, file: &Path) -> Result<PathBuf> {
        fs::canonicalize(file).with_context(|| format!("File not found: {}", file.display()))
    }
}
