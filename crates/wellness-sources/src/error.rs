use thiserror::Error;

/// Errors raised inside a source adapter.
///
/// These never leave the adapter boundary: each adapter logs the error and
/// substitutes its fallback text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("Google Trends error: {0}")]
    Trends(String),

    #[error("SerpAPI error: {0}")]
    SerpApi(String),

    #[error("Reddit API error: {0}")]
    Reddit(String),
}
