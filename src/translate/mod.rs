//! Translation backends.
//!
//! The batch orchestrator only sees the [`Translator`] trait; whether a
//! translation comes from the public Google endpoint, a model behind an HTTP
//! JSON endpoint, or a test double is decided here.
//!
//! # Example
//!
//! ```ignore
//! use keyfill::translate::{GoogleTranslator, Translator};
//!
//! let translator = GoogleTranslator::new()?;
//! let text = translator.translate("你好", "zh-CN", "en").await?;
//! ```

mod error;
mod google;
mod model;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, TranslateMode};

pub use error::{TranslateError, TranslateResult};
pub use google::GoogleTranslator;
pub use model::ModelTranslator;

/// Per-request timeout for the HTTP backends.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A translation capability: `(text, from, to) -> text`, which may fail.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from the `from` language into the `to` language.
    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslateResult<String>;

    /// Name used in logs and reports.
    fn provider_name(&self) -> &str;
}

/// Build the backend selected by `config.translate_mode`.
pub fn translator_from_config(config: &Config) -> TranslateResult<Box<dyn Translator>> {
    match config.translate_mode {
        TranslateMode::Google => Ok(Box::new(GoogleTranslator::new()?)),
        TranslateMode::Model => Ok(Box::new(ModelTranslator::new(
            &config.model.endpoint,
            &config.model.model,
            &config.model.api_key,
        )?)),
    }
}

fn http_client() -> TranslateResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| TranslateError::Network(format!("Failed to create HTTP client: {}", e)))
}
