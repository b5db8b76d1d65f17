use thiserror::Error;

use mealstack_genai::ExtractionError;
use mealstack_scraper::ScrapeError;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The primary page fetch failed. Fatal: no recipe data is possible
    /// without the page.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ScrapeError,
        /// Diagnostic trail accumulated up to the failure.
        logs: Vec<String>,
    },

    /// Both extraction paths came up empty: no structured data, and the
    /// generative fallback failed.
    #[error("fallback extraction failed: {source}")]
    Fallback {
        #[source]
        source: ExtractionError,
        /// Diagnostic trail accumulated across all stages.
        logs: Vec<String>,
    },

    /// HTTP client construction failed during importer setup.
    #[error("importer setup failed: {0}")]
    Setup(String),
}
