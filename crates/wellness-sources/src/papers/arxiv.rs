//! arXiv Atom API search.

use feed_rs::model::Entry;

use super::{with_summary, SUMMARY_CHARS, UNKNOWN_DATE};
use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::input::{single_line, truncate_with_ellipsis};

pub(super) async fn search(
    sources: &WellnessSources,
    topic: &str,
    limit: usize,
) -> Result<Vec<String>, SourceError> {
    let query = build_query(topic);
    let limit = limit.to_string();
    let request = sources
        .client
        .get(format!("{}/api/query", sources.config.endpoints.arxiv))
        .query(&[
            ("search_query", query.as_str()),
            ("start", "0"),
            ("max_results", limit.as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ]);
    let body = sources.get_text(request).await?;
    parse_feed(&body)
}

/// `wellness <topic>` as an AND of `all:` field terms, duplicates removed.
fn build_query(topic: &str) -> String {
    let mut terms: Vec<String> = Vec::new();
    for word in format!("wellness {topic}").split_whitespace() {
        let word = word.to_lowercase();
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
        .iter()
        .map(|term| format!("all:{term}"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn parse_feed(body: &str) -> Result<Vec<String>, SourceError> {
    let feed = feed_rs::parser::parse(body.as_bytes())?;
    Ok(feed.entries.iter().filter_map(format_entry).collect())
}

fn format_entry(entry: &Entry) -> Option<String> {
    let title = entry
        .title
        .as_ref()
        .map(|t| single_line(&t.content))
        .filter(|t| !t.is_empty())?;
    let published = entry
        .published
        .map_or_else(|| UNKNOWN_DATE.to_string(), |d| d.format("%Y-%m-%d").to_string());
    let summary = entry
        .summary
        .as_ref()
        .map(|s| truncate_with_ellipsis(&single_line(&s.content), SUMMARY_CHARS))
        .unwrap_or_default();

    Some(with_summary(format!("Arxiv: {title} ({published})"), &summary))
}
