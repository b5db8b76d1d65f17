//! Model-credential lookup.
//!
//! The credential lives in an external settings store (a single-row
//! configuration lookup owned by the application shell); this module only
//! defines the seam and a process-environment implementation.

use futures::future::BoxFuture;

/// Read-only settings lookup, injected into the extractor. Implementors
/// are external collaborators (a settings table, a config service); the
/// pipeline never writes through this seam.
pub trait SettingsStore: Send + Sync {
    /// The stored model API key, if any.
    fn api_key(&self) -> BoxFuture<'_, Option<String>>;
}

/// [`SettingsStore`] backed by the `GEMINI_API_KEY` environment variable.
pub struct EnvSettings;

impl SettingsStore for EnvSettings {
    fn api_key(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(async { std::env::var("GEMINI_API_KEY").ok() })
    }
}

/// [`SettingsStore`] with a fixed value, for tests and for callers that
/// resolved the key elsewhere (e.g. application config).
pub struct StaticSettings {
    api_key: Option<String>,
}

impl StaticSettings {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl SettingsStore for StaticSettings {
    fn api_key(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(async { self.api_key.clone() })
    }
}

/// Resolves a usable Gemini key from the store.
///
/// Keys with the `sk-` prefix are OpenAI-shaped — a common
/// misconfiguration in the settings row — and are ignored rather than
/// sent to the wrong vendor.
pub(crate) async fn resolve_api_key(store: &dyn SettingsStore) -> Option<String> {
    let key = store.api_key().await?;
    if key.starts_with("sk-") {
        tracing::warn!("settings hold an OpenAI-shaped key; ignoring it for Gemini use");
        return None;
    }
    Some(key)
}
