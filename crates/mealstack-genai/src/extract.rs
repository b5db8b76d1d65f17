//! Text and image extraction against the schema-constrained model.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use mealstack_core::ImportedRecipe;

use crate::client::GeminiClient;
use crate::error::ExtractionError;
use crate::settings::{resolve_api_key, SettingsStore};

/// Accepted image payload shape: `data:<mime>;base64,<data>`.
static DATA_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:([a-z]+/[a-z0-9.+-]+);base64,(.+)$").expect("invalid data-URL regex")
});

/// Generative recipe extractor: a transport client plus the injected
/// settings seam that supplies the model credential per call.
pub struct GeminiExtractor {
    client: GeminiClient,
    settings: Arc<dyn SettingsStore>,
}

impl GeminiExtractor {
    #[must_use]
    pub fn new(client: GeminiClient, settings: Arc<dyn SettingsStore>) -> Self {
        Self { client, settings }
    }

    /// Extracts a recipe from free text (a paste, or a scraped page with
    /// no structured data).
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Validation`] — empty or whitespace-only text;
    ///   rejected before any settings lookup or network call.
    /// - [`ExtractionError::Configuration`] — no usable model credential.
    /// - [`ExtractionError::Http`] / [`ExtractionError::ModelResponse`] —
    ///   transport or reply failures; `ModelResponse` carries the raw
    ///   reply text when the JSON fails to parse as a recipe.
    pub async fn parse_recipe_text(&self, text: &str) -> Result<ImportedRecipe, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::Validation(
                "Recipe text is empty.".to_owned(),
            ));
        }

        let api_key = self.require_api_key().await?;
        let parts = [json!({"text": format!("Extract the recipe from this data: {text}")})];
        let reply = self.client.generate(&api_key, &parts).await?;
        parse_recipe_reply(&reply)
    }

    /// Extracts a recipe from a photograph supplied as a
    /// `data:<mime>;base64,<payload>` URL.
    ///
    /// # Errors
    ///
    /// As [`Self::parse_recipe_text`], with
    /// [`ExtractionError::Validation`] for payloads that do not match the
    /// data-URL shape.
    pub async fn parse_recipe_image(
        &self,
        data_url: &str,
    ) -> Result<ImportedRecipe, ExtractionError> {
        let Some(captures) = DATA_URL_REGEX.captures(data_url.trim()) else {
            return Err(ExtractionError::Validation(
                "Image must be a base64 data URL.".to_owned(),
            ));
        };
        let mime_type = &captures[1];
        let payload = &captures[2];

        let api_key = self.require_api_key().await?;
        let parts = [
            json!({"inlineData": {"mimeType": mime_type, "data": payload}}),
            json!({"text": "Extract the recipe from this image."}),
        ];
        let reply = self.client.generate(&api_key, &parts).await?;
        parse_recipe_reply(&reply)
    }

    async fn require_api_key(&self) -> Result<String, ExtractionError> {
        resolve_api_key(self.settings.as_ref())
            .await
            .ok_or_else(|| {
                ExtractionError::Configuration("no Gemini API key available".to_owned())
            })
    }
}

/// Parses the model's reply text as a recipe document.
///
/// The reply is expected to be one JSON object matching the response
/// schema; parse failures surface the raw text for diagnostics.
fn parse_recipe_reply(reply: &str) -> Result<ImportedRecipe, ExtractionError> {
    serde_json::from_str::<ImportedRecipe>(reply).map_err(|e| ExtractionError::ModelResponse {
        message: format!("model reply is not a valid recipe document: {e}"),
        raw: Some(reply.to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_regex_accepts_common_image_types() {
        for mime in ["image/jpeg", "image/png", "image/webp", "image/svg+xml"] {
            let url = format!("data:{mime};base64,aGVsbG8=");
            let caps = DATA_URL_REGEX.captures(&url).expect(&url);
            assert_eq!(&caps[1], mime);
            assert_eq!(&caps[2], "aGVsbG8=");
        }
    }

    #[test]
    fn data_url_regex_rejects_malformed_payloads() {
        for url in [
            "",
            "not a data url",
            "data:image/png,missing-base64-marker",
            "data:image/png;base64,",
            "https://example.com/photo.png",
        ] {
            assert!(DATA_URL_REGEX.captures(url).is_none(), "accepted: {url}");
        }
    }

    #[test]
    fn recipe_reply_parse_failure_carries_raw_text() {
        let err = parse_recipe_reply("Sorry, I cannot help with that.").unwrap_err();
        match err {
            ExtractionError::ModelResponse { raw, .. } => {
                assert_eq!(raw.as_deref(), Some("Sorry, I cannot help with that."));
            }
            other => panic!("expected ModelResponse, got: {other:?}"),
        }
    }

    #[test]
    fn recipe_reply_happy_path() {
        let reply = r#"{"title":"Toast","cook_time":5,"prep_time":1,"serves":1,
            "ingredients":[{"name":"bread","quantity":"2","units":"slices","ismain":"true"}],
            "method_steps":[{"step_text":"Toast the bread."}]}"#;
        let recipe = parse_recipe_reply(reply).unwrap();
        assert_eq!(recipe.title, "Toast");
        assert_eq!(recipe.ingredients.len(), 1);
    }
}
