use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExtractionError;
use crate::schema::recipe_schema;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Transport client for Gemini's `generateContent` endpoint.
///
/// Every request carries the recipe response schema and a JSON response
/// MIME type, so a successful call yields one JSON document in the reply
/// text. The base URL is injectable for tests.
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: &'a [Value],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client for the given model with the configured timeout
    /// and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(model: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            model: model.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL (tests point this at a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Invokes `generateContent` with the given message parts and returns
    /// the model's reply text.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Http`] — network or TLS failure.
    /// - [`ExtractionError::ModelResponse`] — non-2xx API status, or a
    ///   2xx reply with no text in any candidate.
    pub(crate) async fn generate(
        &self,
        api_key: &str,
        parts: &[Value],
    ) -> Result<String, ExtractionError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: recipe_schema(),
            },
        };

        tracing::debug!(model = %self.model, "invoking generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ModelResponse {
                message: format!("model API returned status {status}"),
                raw: (!body.is_empty()).then_some(body),
            });
        }

        let parsed: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| ExtractionError::ModelResponse {
                    message: format!("model API reply is not valid JSON: {e}"),
                    raw: None,
                })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(ExtractionError::ModelResponse {
                message: "model returned no text".to_owned(),
                raw: None,
            });
        }
        Ok(text)
    }
}
