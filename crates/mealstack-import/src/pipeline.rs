//! Orchestration of one import: fetch, structured extraction, generative
//! fallback.

use std::sync::Arc;

use mealstack_core::{AppConfig, CanonicalRecipe, ImportedRecipe};
use mealstack_genai::{EnvSettings, ExtractionError, GeminiClient, GeminiExtractor, StaticSettings};
use mealstack_scraper::{
    build_recipe, extract_structured, ContextLoader, DiagnosticLog, Extracted, FramedNode,
    HttpContextLoader, PageClient,
};

use crate::error::ImportError;

/// Terminal result of a URL import. Callers must pattern-match: the three
/// arms are distinct shapes, not interchangeable.
///
/// `Structured` is the last-resort arm — the page carried a Recipe-typed
/// node with no usable ingredients or steps (a hollow shell) and the
/// generative fallback also failed, so the raw framed node is handed to
/// the caller, who may choose a different path with it.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Built deterministically from the page's structured data.
    Canonical(CanonicalRecipe),
    /// Extracted by the generative model from the page text.
    Generated(ImportedRecipe),
    /// The raw framed node from a hollow-shell page.
    Structured(FramedNode),
}

/// The import pipeline, with all collaborators explicitly constructed and
/// injected — no process-wide client handles.
pub struct Importer {
    pages: PageClient,
    contexts: Arc<dyn ContextLoader>,
    model: GeminiExtractor,
}

impl Importer {
    #[must_use]
    pub fn new(pages: PageClient, contexts: Arc<dyn ContextLoader>, model: GeminiExtractor) -> Self {
        Self {
            pages,
            contexts,
            model,
        }
    }

    /// Builds a production importer from application config: HTTP-backed
    /// page and context clients, Gemini extractor with the configured
    /// credential (falling back to the process environment when the
    /// config carries none).
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Setup`] if an HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ImportError> {
        let pages = PageClient::new(config.request_timeout_secs, &config.user_agent)
            .map_err(|e| ImportError::Setup(e.to_string()))?;
        let contexts = HttpContextLoader::new(config.request_timeout_secs, &config.user_agent)
            .map_err(|e| ImportError::Setup(e.to_string()))?;
        let client = GeminiClient::new(
            &config.genai_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .map_err(|e| ImportError::Setup(e.to_string()))?;
        let model = match &config.genai_api_key {
            Some(key) => {
                GeminiExtractor::new(client, Arc::new(StaticSettings::new(Some(key.clone()))))
            }
            None => GeminiExtractor::new(client, Arc::new(EnvSettings)),
        };
        Ok(Self::new(pages, Arc::new(contexts), model))
    }

    /// Imports a recipe from an arbitrary recipe web page.
    ///
    /// Linear, no backtracking: fetch the page, try structured (JSON-LD)
    /// extraction, fall through to the generative model when the page has
    /// no structured data or only a hollow shell. Retry policy, if any,
    /// belongs to the model client; this layer never retries.
    ///
    /// # Errors
    ///
    /// - [`ImportError::Fetch`] — network failure or non-2xx on the page
    ///   fetch.
    /// - [`ImportError::Fallback`] — the generative path failed and no
    ///   structured node was in hand. Both variants carry the ordered
    ///   diagnostic trail.
    pub async fn scrape_recipe_from_url(&self, url: &str) -> Result<ImportOutcome, ImportError> {
        let mut log = DiagnosticLog::new();

        log.push(format!("fetching {url}"));
        let page = match self.pages.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                return Err(ImportError::Fetch {
                    url: url.to_owned(),
                    source: e,
                    logs: log.into_lines(),
                })
            }
        };
        log.push(format!("page fetched, {} bytes", page.html.len()));

        let mut hollow_shell: Option<FramedNode> = None;
        match extract_structured(&page.html, self.contexts.as_ref(), &mut log).await {
            Some(node) => match build_recipe(node) {
                Extracted::Canonical(recipe) => {
                    tracing::info!(url, slug = %recipe.slug, "imported from structured data");
                    return Ok(ImportOutcome::Canonical(recipe));
                }
                Extracted::RawNode(node) => {
                    log.push("structured data had no ingredients or steps; trying the generative path");
                    hollow_shell = Some(node);
                }
            },
            None => log.push("no structured data found; trying the generative path"),
        }

        match self.model.parse_recipe_text(&page.html).await {
            Ok(recipe) => {
                tracing::info!(url, title = %recipe.title, "imported via generative fallback");
                Ok(ImportOutcome::Generated(recipe))
            }
            Err(e) => {
                if let Some(node) = hollow_shell {
                    log.push(format!(
                        "generative fallback failed ({e}); returning the raw framed node"
                    ));
                    tracing::warn!(url, error = %e, "falling back to raw structured node");
                    return Ok(ImportOutcome::Structured(node));
                }
                Err(ImportError::Fallback {
                    source: e,
                    logs: log.into_lines(),
                })
            }
        }
    }

    /// Imports a recipe from pasted free text.
    ///
    /// # Errors
    ///
    /// Propagates [`ExtractionError`] from the generative extractor
    /// (validation, configuration, transport, or model-response
    /// failures).
    pub async fn parse_recipe_from_text(
        &self,
        text: &str,
    ) -> Result<ImportedRecipe, ExtractionError> {
        self.model.parse_recipe_text(text).await
    }

    /// Imports a recipe from an uploaded photograph, supplied as a
    /// `data:<mime>;base64,<payload>` URL. Image-resize preprocessing is
    /// the caller's concern; the payload is submitted as received.
    ///
    /// # Errors
    ///
    /// Propagates [`ExtractionError`] from the generative extractor.
    pub async fn parse_recipe_from_image(
        &self,
        data_url: &str,
    ) -> Result<ImportedRecipe, ExtractionError> {
        self.model.parse_recipe_image(data_url).await
    }
}
