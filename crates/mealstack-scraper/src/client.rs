use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;
use crate::types::RawPage;

/// HTTP client for the primary recipe-page fetch.
///
/// Follows standard redirects (reqwest's default policy). A non-2xx
/// response is a typed error distinct from a network failure, because the
/// orchestrator treats both as fatal but reports them differently.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the page at `url`.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScrapeError::Http`] — network, TLS, or body-read failure.
    pub async fn fetch_page(&self, url: &str) -> Result<RawPage, ScrapeError> {
        tracing::debug!(url, "fetching recipe page");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(url, bytes = html.len(), "page fetched");
        Ok(RawPage {
            url: url.to_owned(),
            html,
        })
    }
}
