#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration for the import pipeline.
///
/// Loaded once at startup (see [`crate::config::load_app_config`]) and
/// passed by reference into the components that need it; no process-wide
/// mutable handles.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Timeout for the primary page fetch and JSON-LD context fetches.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Generative model used by the fallback extractor.
    pub genai_model: String,
    /// Environment-level model credential. The settings store takes
    /// precedence; this is the fallback.
    pub genai_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("genai_model", &self.genai_model)
            .field(
                "genai_api_key",
                &self.genai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
