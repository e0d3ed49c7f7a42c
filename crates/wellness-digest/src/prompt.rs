//! Prompt text and tool declarations for the summary generator.

use serde_json::json;
use wellness_core::DateRange;

use crate::llm::ToolSpec;

pub const TRENDS_TOOL: &str = "GetWellnessTrends";
pub const SOCIAL_TOOL: &str = "GetSocialBuzzPosts";
pub const FORUM_TOOL: &str = "GetRedditWellnessDiscussions";
pub const PAPERS_TOOL: &str = "GetResearchPapers";

/// Human turn of the tool-offer pass.
pub const TOOL_PASS_REQUEST: &str = "Generate the wellness summary.";
/// Human turn of the final pass, after the pre-filled context.
pub const FINAL_PASS_REQUEST: &str = "Generate the wellness summary";

const SUMMARY_SCHEMA: &str = r#"{
    "time_period": "string (e.g., 'Last Week')",
    "popular_trends": ["string", "string", ...],
    "social_buzz": ["string", "string", ...],
    "notable_insights": [
        {
            "date": "YYYY-MM-DD",
            "title": "string",
            "description": "string",
            "impact": "string",
            "source": "string",
            "category": "string"
        },
        ...
    ],
    "lifestyle_recommendations": "string",
    "future_outlook": "string"
}"#;

#[must_use]
pub fn system_prompt(range: &DateRange) -> String {
    format!(
        "You are a Wellness Timeline Generator.

Your task is to generate a structured wellness summary based strictly on real data retrieved from tools. \
You may use creativity and engaging language only in how the summary is written, but not in the factual \
content (e.g., trends, tweets, Reddit posts, research papers).

ONLY use the following tools to generate content:
1. `{TRENDS_TOOL}` for Google Trends data
2. `{SOCIAL_TOOL}` for top tweets/X posts
3. `{FORUM_TOOL}` for Reddit posts
4. `{PAPERS_TOOL}` for research-backed insights

Do NOT fabricate or assume information from other platforms like TikTok, Pinterest, or HubSpot unless \
the tools return that data explicitly.

Time Period: {period}

IMPORTANT: You must return your response as a single JSON string that matches this exact structure:
{SUMMARY_SCHEMA}

Do not include any additional text or formatting. Return ONLY the JSON string.",
        period = range.describe(),
    )
}

/// The four retrieval actions, declared as function tools taking one
/// free-text instruction string.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    let dates_only = instruction_schema("Two ISO dates, e.g. `2025-06-08 2025-06-15`.");
    vec![
        ToolSpec::function(
            TRENDS_TOOL,
            "Average Google Trends interest for common wellness keywords between two dates.",
            dates_only.clone(),
        ),
        ToolSpec::function(
            SOCIAL_TOOL,
            "Most-liked recent posts on X about wellness, fitness and meditation.",
            dates_only.clone(),
        ),
        ToolSpec::function(
            FORUM_TOOL,
            "Hot Reddit posts from wellness subreddits created between two dates.",
            dates_only,
        ),
        ToolSpec::function(
            PAPERS_TOOL,
            "Recent research papers on a topic from arXiv, PubMed, Google Scholar results and Semantic Scholar.",
            instruction_schema(
                "Two ISO dates followed by a quoted topic, e.g. `2025-06-08 2025-06-15 \"sleep\"`.",
            ),
        ),
    ]
}

fn instruction_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "input": { "type": "string", "description": description }
        },
        "required": ["input"]
    })
}
