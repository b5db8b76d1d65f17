use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Rejected input, detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Missing or unusable model credential — an operational
    /// misconfiguration, surfaced verbatim.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model returned no text, or text that fails schema
    /// expectations. `raw` carries the offending response body when one
    /// exists, for debugging.
    #[error("model response error: {message}")]
    ModelResponse {
        message: String,
        raw: Option<String>,
    },
}
