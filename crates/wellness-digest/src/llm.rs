//! Minimal OpenAI-compatible chat-completions client.
//!
//! Works against any gateway that speaks `POST {base}/chat/completions` with
//! bearer auth (OpenRouter by default).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use wellness_core::AppConfig;

use crate::error::DigestError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Whole-request timeout; `0` leaves only the connect timeout.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Model settings from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::MissingApiKey`] when no gateway key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DigestError> {
        let api_key = config
            .require_llm_api_key()
            .map_err(|_| DigestError::MissingApiKey)?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.llm_base_url.clone(),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            timeout_secs: config.llm_timeout_secs,
        })
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A function tool offered to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    #[must_use]
    pub fn function(
        name: &'static str,
        description: &'static str,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function",
            function: FunctionSpec {
                name,
                description,
                parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "<[ToolSpec]>::is_empty")]
    tools: &'a [ToolSpec],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ResponseToolCall>,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    function: ResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ResponseFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

/// A tool invocation the model asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedToolCall {
    pub name: String,
    pub arguments: String,
}

/// The first choice of a chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub content: Option<String>,
    pub tool_calls: Vec<RequestedToolCall>,
}

pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns [`DigestError::Http`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, DigestError> {
        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one chat completion request. When `tools` is non-empty they are
    /// offered with `tool_choice: "auto"`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Http`] on transport failure,
    /// [`DigestError::Llm`] on a non-2xx status, and
    /// [`DigestError::InvalidResponse`] when the body has no usable choice.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatReply, DigestError> {
        let request = ChatCompletionsRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            tools,
            tool_choice: (!tools.is_empty()).then_some("auto"),
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Llm {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatCompletionsResponse = serde_json::from_str(&body)
            .map_err(|e| DigestError::InvalidResponse(format!("chat completion body: {e}")))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DigestError::InvalidResponse("no choices in response".to_string()))?;

        Ok(ChatReply {
            content: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .into_iter()
                .map(|call| RequestedToolCall {
                    name: call.function.name,
                    arguments: call.function.arguments,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_tools_when_none_are_offered() {
        let messages = [ChatMessage::user("hi")];
        let request = ChatCompletionsRequest {
            model: "m",
            messages: &messages,
            temperature: 0.5,
            tools: &[],
            tool_choice: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "messages": [{ "role": "user", "content": "hi" }],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn tool_spec_serializes_as_function_tool() {
        let tool = ToolSpec::function("Lookup", "Looks up.", serde_json::json!({ "type": "object" }));
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "Lookup");
        assert_eq!(json["function"]["parameters"]["type"], "object");
    }

    fn app_config() -> AppConfig {
        AppConfig {
            log_level: "info".to_string(),
            llm_api_key: Some("sk-or-test".to_string()),
            llm_base_url: "https://openrouter.ai/api/v1".to_string(),
            llm_model: "test/model".to_string(),
            llm_temperature: 0.6,
            x_bearer_token: None,
            reddit_client_id: None,
            reddit_client_secret: None,
            reddit_user_agent: "wellness".to_string(),
            serp_api_key: None,
            research_topic: "wellness research".to_string(),
            output_dir: ".".into(),
            wkhtmltopdf_path: "/usr/local/bin/wkhtmltopdf".into(),
            request_timeout_secs: 30,
            llm_timeout_secs: 300,
            trends_delay_ms: 500,
        }
    }

    #[test]
    fn model_uses_its_own_timeout_not_the_source_timeout() {
        let config = LlmConfig::from_app_config(&app_config()).unwrap();
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.api_key, "sk-or-test");
    }

    #[test]
    fn missing_key_is_reported_as_missing_api_key() {
        let mut app = app_config();
        app.llm_api_key = None;
        assert!(matches!(
            LlmConfig::from_app_config(&app),
            Err(DigestError::MissingApiKey)
        ));
    }

    #[test]
    fn zero_timeout_still_builds_a_client() {
        let mut app = app_config();
        app.llm_timeout_secs = 0;
        let config = LlmConfig::from_app_config(&app).unwrap();
        assert!(LlmClient::new(config).is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = LlmConfig {
            api_key: "sk-secret".to_string(),
            base_url: "http://localhost".to_string(),
            model: "m".to_string(),
            temperature: 0.6,
            timeout_secs: 5,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
