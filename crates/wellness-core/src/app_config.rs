use std::path::PathBuf;

use crate::ConfigError;

/// Environment variable holding the model gateway key.
pub const LLM_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub x_bearer_token: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub serp_api_key: Option<String>,
    pub research_topic: String,
    pub output_dir: PathBuf,
    pub wkhtmltopdf_path: PathBuf,
    /// Per-request timeout for the source adapters.
    pub request_timeout_secs: u64,
    /// Whole-request timeout for model calls; `0` disables it.
    pub llm_timeout_secs: u64,
    pub trends_delay_ms: u64,
}

impl AppConfig {
    /// Returns the model gateway key, which the digest run cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `OPENROUTER_API_KEY` is unset or blank.
    pub fn require_llm_api_key(&self) -> Result<&str, ConfigError> {
        self.llm_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(LLM_API_KEY_VAR.to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "[redacted]"))
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field(
                "x_bearer_token",
                &self.x_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field(
                "serp_api_key",
                &self.serp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("research_topic", &self.research_topic)
            .field("output_dir", &self.output_dir)
            .field("wkhtmltopdf_path", &self.wkhtmltopdf_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("trends_delay_ms", &self.trends_delay_ms)
            .finish()
    }
}
