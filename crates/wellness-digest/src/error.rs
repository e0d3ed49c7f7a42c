use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API key is not configured (set {})", wellness_core::app_config::LLM_API_KEY_VAR)]
    MissingApiKey,

    #[error("model API returned {status}: {body}")]
    Llm { status: u16, body: String },

    #[error("malformed model API response: {0}")]
    InvalidResponse(String),

    #[error("model output is not a valid wellness summary: {0}")]
    SummaryParse(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}
