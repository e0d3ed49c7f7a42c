use std::path::PathBuf;

use crate::app_config::{AppConfig, LLM_API_KEY_VAR};
use crate::ConfigError;

const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "mistralai/mistral-small-3.1-24b-instruct:free";
const DEFAULT_WKHTMLTOPDF_PATH: &str = "/usr/local/bin/wkhtmltopdf";
/// Whole-request cap for a model call; free-tier models can take minutes.
const DEFAULT_LLM_TIMEOUT_SECS: &str = "300";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every credential is optional here: a missing source credential only degrades
/// that source, and the model key is checked by the caller that needs it.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let llm_temperature = parse_temperature(&or_default("WELLNESS_LLM_TEMPERATURE", "0.6"))?;

    Ok(AppConfig {
        log_level: or_default("WELLNESS_LOG_LEVEL", "info"),
        llm_api_key: optional(LLM_API_KEY_VAR),
        llm_base_url: or_default("WELLNESS_LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
        llm_model: or_default("WELLNESS_LLM_MODEL", DEFAULT_LLM_MODEL),
        llm_temperature,
        x_bearer_token: optional("X_BEARER_TOKEN"),
        reddit_client_id: optional("REDDIT_CLIENT_ID"),
        reddit_client_secret: optional("REDDIT_CLIENT_SECRET"),
        reddit_user_agent: or_default("REDDIT_USER_AGENT", "wellness"),
        serp_api_key: optional("SERP_API_KEY"),
        research_topic: or_default("WELLNESS_RESEARCH_TOPIC", "wellness research"),
        output_dir: PathBuf::from(or_default("WELLNESS_OUTPUT_DIR", ".")),
        wkhtmltopdf_path: PathBuf::from(or_default(
            "WELLNESS_WKHTMLTOPDF_PATH",
            DEFAULT_WKHTMLTOPDF_PATH,
        )),
        request_timeout_secs: parse_u64("WELLNESS_REQUEST_TIMEOUT_SECS", "30")?,
        llm_timeout_secs: parse_u64("WELLNESS_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
        trends_delay_ms: parse_u64("WELLNESS_TRENDS_DELAY_MS", "500")?,
    })
}

/// Parse a sampling temperature, accepting the `[0, 2]` range chat gateways allow.
fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "WELLNESS_LLM_TEMPERATURE".to_string(),
        reason,
    };
    let value = raw.parse::<f32>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!("{value} is outside 0.0..=2.0")));
    }
    Ok(value)
}
