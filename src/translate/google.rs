//! Google Translate through the public `translate_a/single` endpoint.
//!
//! No API key is needed. The endpoint is meant for light use and is rate
//! limited, which is one reason batches run one request at a time.

use async_trait::async_trait;
use serde_json::Value;

use super::{TranslateError, TranslateResult, Translator, http_client};

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new() -> TranslateResult<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the translator at a different endpoint with the same API shape.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslateResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| TranslateError::Config(format!("Invalid base URL: {}", e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await?;
        parse_response(&json)
    }

    fn provider_name(&self) -> &str {
        "google"
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Hello", "你好", null, null, 10], ...], null, "zh-CN"]`;
/// the first element of each inner segment is translated text.
fn parse_response(json: &Value) -> TranslateResult<String> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidResponse("missing segment array".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::InvalidResponse(
            "no translated segments".to_string(),
        ));
    }
    Ok(translated)
}
