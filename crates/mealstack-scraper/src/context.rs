//! Remote-context resolution for the framing step.

use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::ScrapeError;

/// Machine-readable schema.org context document. The vocabulary root
/// itself serves an HTML landing page to naive fetches, even with a JSON
/// `Accept` header, so requests for it are rewritten to this URL.
const SCHEMA_ORG_CONTEXT_URL: &str = "https://schema.org/docs/jsonldcontext.json";

/// Loads JSON-LD context documents referenced by `@context` URLs.
///
/// The loader is pluggable so the framing step can run offline (tests,
/// pages with inline contexts) or against the network.
pub trait ContextLoader: Send + Sync {
    /// Fetches the context document at `url`.
    ///
    /// # Errors
    ///
    /// Any error aborts the frame operation in progress; the structured
    /// extractor then reports "no structured data" and the pipeline falls
    /// through to the generative path.
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, ScrapeError>>;
}

/// HTTP-backed [`ContextLoader`].
///
/// Requests for any spelling of the schema.org root are redirected to the
/// machine-readable context document; every other URL is a passthrough
/// GET with an `Accept: application/ld+json, application/json` header.
pub struct HttpContextLoader {
    client: reqwest::Client,
}

impl HttpContextLoader {
    /// Creates a loader with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Rewrites schema.org root URLs to the machine-readable context
    /// document; leaves every other URL untouched.
    pub(crate) fn rewrite_url(url: &str) -> &str {
        match url {
            "https://schema.org/" | "https://schema.org" | "http://schema.org/"
            | "http://schema.org" => SCHEMA_ORG_CONTEXT_URL,
            other => other,
        }
    }
}

impl ContextLoader for HttpContextLoader {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, ScrapeError>> {
        Box::pin(async move {
            let target = Self::rewrite_url(url);
            tracing::debug!(url = target, "fetching JSON-LD context");

            let response = self
                .client
                .get(target)
                .header(
                    reqwest::header::ACCEPT,
                    "application/ld+json, application/json",
                )
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::ContextStatus {
                    status: status.as_u16(),
                    url: target.to_owned(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ScrapeError::ContextParse {
                url: target.to_owned(),
                source: e,
            })
        })
    }
}

/// [`ContextLoader`] that serves one fixed document for every URL.
///
/// Used by tests and by callers that want framing to run fully offline
/// against a vendored schema.org context.
pub struct StaticContextLoader {
    document: Value,
}

impl StaticContextLoader {
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

impl ContextLoader for StaticContextLoader {
    fn load<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<Value, ScrapeError>> {
        Box::pin(async move { Ok(self.document.clone()) })
    }
}
