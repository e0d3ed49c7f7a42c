//! X (Twitter) API v2 recent-search collector.

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Utc};
use serde::Deserialize;
use wellness_core::DateRange;

use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::fallback::NO_SOCIAL_POSTS;
use crate::input::{parse_date_range, single_line, truncate_with_ellipsis};
use crate::MAX_RESULTS;

const SEARCH_QUERY: &str = "(wellness OR fitness OR meditation) lang:en -is:retweet";
const PAGE_SIZE: &str = "10";
const TWEET_FIELDS: &str = "public_metrics,created_at,author_id";
const SNIPPET_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    text: String,
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    like_count: u64,
}

pub(crate) async fn fetch_social_buzz(
    sources: &WellnessSources,
    input: &str,
) -> Result<String, SourceError> {
    let range = parse_date_range(input)?;
    let token = sources
        .config
        .x_bearer_token
        .as_deref()
        .ok_or(SourceError::MissingCredential("X_BEARER_TOKEN"))?;

    let (start_time, end_time) = search_window(&range, Utc::now())?;
    let start_time = start_time.to_rfc3339_opts(SecondsFormat::Secs, true);
    let end_time = end_time.to_rfc3339_opts(SecondsFormat::Secs, true);

    let request = sources
        .client
        .get(format!(
            "{}/2/tweets/search/recent",
            sources.config.endpoints.x_api
        ))
        .bearer_auth(token)
        .query(&[
            ("query", SEARCH_QUERY),
            ("max_results", PAGE_SIZE),
            ("tweet.fields", TWEET_FIELDS),
            ("start_time", start_time.as_str()),
            ("end_time", end_time.as_str()),
        ]);
    let response: SearchResponse = sources.get_json(request, "X recent search").await?;

    tracing::debug!(posts = response.data.len(), "X recent search returned");
    Ok(format_posts(&response.data))
}

/// Clamp the date range to what recent search accepts: no earlier than seven
/// days ago and no later than a few seconds before the request.
fn search_window(
    range: &DateRange,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), SourceError> {
    let earliest = now - Duration::days(7) + Duration::minutes(1);
    let latest = now - Duration::seconds(30);

    let requested_start = range.start.and_time(NaiveTime::MIN).and_utc();
    let requested_end = range
        .end
        .and_hms_opt(23, 59, 59)
        .map_or(requested_start, |end| end.and_utc());

    let start = requested_start.max(earliest);
    let end = requested_end.min(latest);
    if start >= end {
        return Err(SourceError::InvalidInput(format!(
            "date range {} is outside the recent-search window",
            range.describe()
        )));
    }
    Ok((start, end))
}

fn format_posts(tweets: &[Tweet]) -> String {
    let lines: Vec<String> = tweets
        .iter()
        .filter_map(|tweet| {
            let likes = tweet.public_metrics.as_ref()?.like_count;
            let snippet = truncate_with_ellipsis(&single_line(&tweet.text), SNIPPET_CHARS);
            Some(format!("- \"{snippet}\" — {likes} likes"))
        })
        .take(MAX_RESULTS)
        .collect();

    if lines.is_empty() {
        NO_SOCIAL_POSTS.to_string()
    } else {
        lines.join("\n")
    }
}
