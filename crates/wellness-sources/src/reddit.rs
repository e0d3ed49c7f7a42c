//! Reddit hot-listing collector (client-credentials OAuth).

use chrono::{NaiveTime, TimeDelta};
use serde::Deserialize;
use wellness_core::DateRange;

use crate::client::{check_status, WellnessSources};
use crate::error::SourceError;
use crate::fallback::NO_FORUM_POSTS;
use crate::input::{parse_date_range, single_line};
use crate::MAX_RESULTS;

const WELLNESS_SUBREDDITS: &[&str] = &["fitness", "wellness", "Health", "MentalHealth", "nutrition"];
const HOT_LIMIT: &str = "50";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    created_utc: f64,
}

/// Reddit API client with a valid access token.
struct RedditClient<'a> {
    sources: &'a WellnessSources,
    token: String,
}

impl<'a> RedditClient<'a> {
    /// Exchange the configured client credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingCredential`] when the client id or secret
    /// is unset, or [`SourceError::Reddit`] if token exchange fails.
    async fn connect(sources: &'a WellnessSources) -> Result<Self, SourceError> {
        let config = &sources.config;
        let client_id = config
            .reddit_client_id
            .as_deref()
            .ok_or(SourceError::MissingCredential("REDDIT_CLIENT_ID"))?;
        let client_secret = config
            .reddit_client_secret
            .as_deref()
            .ok_or(SourceError::MissingCredential("REDDIT_CLIENT_SECRET"))?;

        let response = sources
            .client
            .post(format!(
                "{}/api/v1/access_token",
                config.endpoints.reddit_auth
            ))
            .header("User-Agent", &config.reddit_user_agent)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Reddit(format!("token parse error: {e}")))?;

        Ok(Self {
            sources,
            token: token_resp.access_token,
        })
    }

    /// First page of a subreddit's hot listing.
    async fn hot(&self, subreddit: &str) -> Result<Vec<PostData>, SourceError> {
        let config = &self.sources.config;
        let response = self
            .sources
            .client
            .get(format!("{}/r/{subreddit}/hot", config.endpoints.reddit_api))
            .bearer_auth(&self.token)
            .header("User-Agent", &config.reddit_user_agent)
            .query(&[("limit", HOT_LIMIT)])
            .send()
            .await?;
        let response = check_status(response)?;

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SourceError::Reddit(format!("Reddit response parse error: {e}")))?;

        Ok(listing.data.children.into_iter().map(|post| post.data).collect())
    }
}

pub(crate) async fn fetch_wellness_discussions(
    sources: &WellnessSources,
    input: &str,
) -> Result<String, SourceError> {
    let range = parse_date_range(input)?;
    let (start_ts, end_ts) = utc_bounds(&range);
    let reddit = RedditClient::connect(sources).await?;

    let mut results = Vec::new();
    for subreddit in WELLNESS_SUBREDDITS {
        if results.len() >= MAX_RESULTS {
            break;
        }

        let posts = reddit.hot(subreddit).await?;
        let before = results.len();
        results.extend(
            posts
                .iter()
                .filter(|post| post.created_utc >= start_ts && post.created_utc < end_ts)
                .filter_map(format_post),
        );
        tracing::debug!(
            subreddit,
            listed = posts.len(),
            in_range = results.len() - before,
            "collected Reddit hot posts"
        );
    }

    if results.is_empty() {
        return Ok(NO_FORUM_POSTS.to_string());
    }
    results.truncate(MAX_RESULTS);
    Ok(results.join("\n"))
}

/// Unix-second bounds covering the whole range: start-of-day on the first date
/// up to (but excluding) the day after the last.
#[allow(clippy::cast_precision_loss)]
fn utc_bounds(range: &DateRange) -> (f64, f64) {
    let start = range.start.and_time(NaiveTime::MIN).and_utc().timestamp();
    let end = (range.end.and_time(NaiveTime::MIN).and_utc() + TimeDelta::days(1)).timestamp();
    (start as f64, end as f64)
}

fn format_post(post: &PostData) -> Option<String> {
    let title = post
        .title
        .as_deref()
        .map(single_line)
        .filter(|title| !title.is_empty())?;
    Some(format!(
        "\"{title}\" — {} upvotes, {} comments",
        post.score, post.num_comments
    ))
}
