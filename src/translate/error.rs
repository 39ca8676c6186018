use thiserror::Error;

/// Error types for translation backends.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Backend is missing required settings
    #[error("Configuration error: {0}")]
    Config(String),
    /// Request could not be sent or did not complete
    #[error("Network error: {0}")]
    Network(String),
    /// Backend answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslateError::InvalidResponse(err.to_string())
        } else {
            TranslateError::Network(err.to_string())
        }
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
