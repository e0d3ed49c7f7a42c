//! Turns the assembled context into a validated [`WellnessSummary`].

use wellness_core::{DateRange, WellnessSummary};

use crate::error::DigestError;
use crate::llm::{ChatMessage, LlmClient};
use crate::prompt::{system_prompt, tool_specs, FINAL_PASS_REQUEST, TOOL_PASS_REQUEST};

pub struct SummaryGenerator {
    llm: LlmClient,
}

impl SummaryGenerator {
    #[must_use]
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Two model invocations: a tool-offer pass whose outcome is only logged,
    /// then the final pass that must answer with one summary JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::SummaryParse`] when the final reply is empty or
    /// does not match the summary schema, or the client error if the final
    /// request itself fails.
    pub async fn generate(
        &self,
        range: &DateRange,
        context: &str,
    ) -> Result<WellnessSummary, DigestError> {
        let system = system_prompt(range);
        self.offer_tools(&system).await;

        let messages = [
            ChatMessage::system(system),
            ChatMessage::assistant(context),
            ChatMessage::user(FINAL_PASS_REQUEST),
        ];
        tracing::info!(model = self.llm.model(), "requesting wellness summary");
        let reply = self.llm.complete(&messages, &[]).await?;

        let content = reply
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DigestError::SummaryParse("model returned no content".to_string()))?;
        parse_summary(&content)
    }

    /// Every source has already been collected, so requested tool calls are
    /// logged rather than executed.
    async fn offer_tools(&self, system: &str) {
        let messages = [
            ChatMessage::system(system),
            ChatMessage::user(TOOL_PASS_REQUEST),
        ];
        match self.llm.complete(&messages, &tool_specs()).await {
            Ok(reply) => {
                if reply.tool_calls.is_empty() {
                    tracing::debug!("tool-offer pass requested no tools");
                }
                for call in &reply.tool_calls {
                    tracing::info!(
                        tool = call.name.as_str(),
                        arguments = call.arguments.as_str(),
                        "model requested tool; using pre-collected source output"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "tool-offer pass failed; continuing with collected context");
            }
        }
    }
}

/// The JSON body of a model reply.
///
/// A reply that opens with `{` only loses a trailing ```` ``` ````. Otherwise
/// the first fenced block wins, with any prose around it and an optional
/// `json` tag dropped. Text without a fence is returned trimmed.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    if text.starts_with('{') {
        return text.strip_suffix("```").unwrap_or(text).trim_end();
    }
    let Some(open) = text.find("```") else {
        return text;
    };
    let body = &text[open + 3..];
    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);
    let body = body.find("```").map_or(body, |close| &body[..close]);
    body.trim()
}

/// # Errors
///
/// Returns [`DigestError::SummaryParse`] when the text is not a JSON object
/// with all six summary fields of the right types.
pub fn parse_summary(raw: &str) -> Result<WellnessSummary, DigestError> {
    serde_json::from_str(strip_code_fences(raw)).map_err(|e| DigestError::SummaryParse(e.to_string()))
}
