//! Generic HTTP JSON endpoint, typically an LLM wrapper.
//!
//! Request: `POST <endpoint>` with `{"text", "from", "to", "model"}` and a
//! bearer token. Response: `{"translation": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{TranslateError, TranslateResult, Translator, http_client};

#[derive(Clone)]
pub struct ModelTranslator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ModelRequest<'a> {
    text: &'a str,
    from: &'a str,
    to: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelResponse {
    translation: Option<String>,
}

impl ModelTranslator {
    /// Only presence of the endpoint is checked; a bad URL surfaces as a
    /// failed request.
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> TranslateResult<Self> {
        if endpoint.trim().is_empty() {
            return Err(TranslateError::Config(
                "model endpoint is not configured".to_string(),
            ));
        }

        Ok(Self {
            client: http_client()?,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl std::fmt::Debug for ModelTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelTranslator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl Translator for ModelTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslateResult<String> {
        let mut request = self.client.post(&self.endpoint).json(&ModelRequest {
            text,
            from,
            to,
            model: &self.model,
        });
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ModelResponse = response.json().await?;
        body.translation.ok_or_else(|| {
            TranslateError::InvalidResponse("missing 'translation' field".to_string())
        })
    }

    fn provider_name(&self) -> &str {
        "model"
    }
}
