//! The adapter facade: one shared HTTP client, four text-returning adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::fallback::{FORUM_FALLBACK, PAPERS_FALLBACK, SOCIAL_FALLBACK, TRENDS_FALLBACK};
use crate::types::{SourceKind, SourcesConfig};
use crate::{papers, reddit, social, trends};

const USER_AGENT: &str = "wellness-digest/0.1";

/// Entry point for the four source adapters.
///
/// Every adapter method takes the combined instruction string (two ISO dates,
/// plus a quoted topic for papers) and always returns text: real findings,
/// a "no results" line, or the adapter's fallback constant.
pub struct WellnessSources {
    pub(crate) client: Client,
    pub(crate) config: SourcesConfig,
}

impl WellnessSources {
    /// Creates the adapter facade with a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: SourcesConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Average search interest for a fixed set of wellness keywords.
    pub async fn popular_wellness_trends(&self, input: &str) -> String {
        or_fallback(
            SourceKind::Trends,
            trends::fetch_wellness_trends(self, input).await,
            TRENDS_FALLBACK,
        )
    }

    /// Most-liked recent wellness posts on X.
    pub async fn social_buzz_posts(&self, input: &str) -> String {
        or_fallback(
            SourceKind::SocialPosts,
            social::fetch_social_buzz(self, input).await,
            SOCIAL_FALLBACK,
        )
    }

    /// Hot posts from wellness subreddits created within the date range.
    pub async fn reddit_wellness_discussions(&self, input: &str) -> String {
        or_fallback(
            SourceKind::Forum,
            reddit::fetch_wellness_discussions(self, input).await,
            FORUM_FALLBACK,
        )
    }

    /// Papers on the quoted topic from the arXiv → PubMed → SerpAPI →
    /// Semantic Scholar chain.
    pub async fn research_papers(&self, input: &str) -> String {
        or_fallback(
            SourceKind::Papers,
            papers::fetch_research_papers(self, input).await,
            PAPERS_FALLBACK,
        )
    }

    /// Sends a request and decodes a JSON body, treating any non-2xx status
    /// as an error.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, SourceError> {
        let body = self.get_text(request).await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Sends a request and returns the body text of a 2xx response.
    pub(crate) async fn get_text(&self, request: RequestBuilder) -> Result<String, SourceError> {
        let response = check_status(request.send().await?)?;
        Ok(response.text().await?)
    }
}

pub(crate) fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

/// Collapse an adapter result to text, logging and substituting the fallback on error.
fn or_fallback(kind: SourceKind, result: Result<String, SourceError>, fallback: &str) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!(source = %kind, "adapter produced no text; using fallback");
            fallback.to_string()
        }
        Err(e) => {
            tracing::warn!(
                source = %kind,
                error = %e,
                hint = kind.hint(),
                "adapter failed; using fallback"
            );
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_replaces_errors_and_blank_text() {
        let failed = or_fallback(
            SourceKind::Trends,
            Err(SourceError::InvalidInput("no dates".to_string())),
            TRENDS_FALLBACK,
        );
        assert_eq!(failed, TRENDS_FALLBACK);

        let blank = or_fallback(SourceKind::Papers, Ok("  \n".to_string()), PAPERS_FALLBACK);
        assert_eq!(blank, PAPERS_FALLBACK);

        let ok = or_fallback(SourceKind::Forum, Ok("- post".to_string()), FORUM_FALLBACK);
        assert_eq!(ok, "- post");
    }
}
