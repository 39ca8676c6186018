use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keyfillrc.json";

pub const DEFAULT_MARKER: &str = "$t";

pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "vue"];

pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["dist", "node_modules", ".next", ".nuxt"];

/// Which backend fills untranslated keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TranslateMode {
    #[default]
    Google,
    Model,
}

/// Settings of the HTTP JSON model backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translation_path")]
    pub translation_path: String,
    #[serde(default)]
    pub translate_mode: TranslateMode,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_langs")]
    pub target_langs: Vec<String>,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_translation_path() -> String {
    "locales/translation.json".to_string()
}

fn default_source_lang() -> String {
    "zh-CN".to_string()
}

fn default_target_langs() -> Vec<String> {
    ["en", "zh_CN", "zh_HK"].map(String::from).to_vec()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_path: default_translation_path(),
            translate_mode: TranslateMode::default(),
            source_lang: default_source_lang(),
            target_langs: default_target_langs(),
            model: ModelConfig::default(),
            marker: default_marker(),
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, if the
    /// marker or the target languages are empty, or if `model` mode is
    /// selected without an endpoint.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.marker.trim().is_empty() {
            anyhow::bail!("'marker' must not be empty");
        }

        if self.target_langs.is_empty() {
            anyhow::bail!("'targetLangs' must list at least one language");
        }

        if self.translate_mode == TranslateMode::Model && self.model.endpoint.trim().is_empty() {
            anyhow::bail!("'model.endpoint' is required when 'translateMode' is \"model\"");
        }

        Ok(())
    }

    /// Location of the translation file. Relative paths are taken from `root`.
    pub fn translation_file(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.translation_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Why a config file that exists was not used.
    pub ignored_error: Option<String>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                ignored_error: None,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            ignored_error: None,
        }),
    }
}

/// Like [`load_config`], but a broken config file is logged and replaced by
/// the defaults instead of failing.
pub fn load_config_or_default(start_dir: &Path) -> ConfigLoadResult {
    match load_config(start_dir) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!("Ignoring config file, using defaults: {:#}", err);
            ConfigLoadResult {
                config: Config::default(),
                from_file: false,
                ignored_error: Some(format!("{:#}", err)),
            }
        }
    }
}
