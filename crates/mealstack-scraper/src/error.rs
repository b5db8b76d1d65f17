use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("context fetch for {url} returned status {status}")]
    ContextStatus { status: u16, url: String },

    #[error("context document from {url} is not valid JSON: {source}")]
    ContextParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
