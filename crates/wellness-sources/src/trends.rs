//! Google Trends interest-over-time collector.
//!
//! Talks to the same two endpoints the Trends web UI uses: `explore` hands out
//! a token for the `TIMESERIES` widget, and `widgetdata/multiline` returns the
//! interest timeline for that token. Both bodies start with an anti-hijacking
//! prefix (`)]}'`) that must be stripped before the JSON parses.

use std::time::Duration;

use serde::Deserialize;
use wellness_core::DateRange;

use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::fallback::TRENDS_PLACEHOLDER;
use crate::input::parse_date_range;
use crate::MAX_RESULTS;

const WELLNESS_KEYWORDS: &[&str] = &[
    "wellness",
    "health",
    "fitness",
    "meditation",
    "nutrition",
    "mental health",
    "sleep",
    "yoga",
    "wellbeing",
    "self-care",
    "mindfulness",
    "exercise",
];

/// Keywords at or below this average interest are not reported.
const MIN_AVG_INTEREST: f64 = 20.0;
const HOST_LANGUAGE: &str = "en-US";
const TIMEZONE_OFFSET: &str = "360";

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: Option<String>,
    request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    value: Vec<f64>,
}

pub(crate) async fn fetch_wellness_trends(
    sources: &WellnessSources,
    input: &str,
) -> Result<String, SourceError> {
    let range = parse_date_range(input)?;
    let delay = Duration::from_millis(sources.config.trends_delay_ms);

    let mut trends = Vec::new();
    for keyword in WELLNESS_KEYWORDS {
        if trends.len() >= MAX_RESULTS {
            break;
        }

        if let Some(avg) = keyword_interest(sources, keyword, &range).await? {
            tracing::debug!(keyword, avg, "Google Trends average interest");
            if avg > MIN_AVG_INTEREST {
                trends.push(format!("{}: Avg interest {avg:.1}", capitalize(keyword)));
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(format_trends(&trends))
}

/// Average interest for one keyword over the range, or `None` when Trends has
/// no timeline data for it.
async fn keyword_interest(
    sources: &WellnessSources,
    keyword: &str,
    range: &DateRange,
) -> Result<Option<f64>, SourceError> {
    let base = &sources.config.endpoints.trends;
    let explore_req = serde_json::json!({
        "comparisonItem": [{
            "keyword": keyword,
            "geo": "",
            "time": format!("{} {}", range.start_str(), range.end_str()),
        }],
        "category": 0,
        "property": "",
    })
    .to_string();

    let request = sources
        .client
        .get(format!("{base}/trends/api/explore"))
        .query(&[
            ("hl", HOST_LANGUAGE),
            ("tz", TIMEZONE_OFFSET),
            ("req", explore_req.as_str()),
        ]);
    let body = sources.get_text(request).await?;
    let (token, widget_req) = timeseries_widget(&body)?;

    let request = sources
        .client
        .get(format!("{base}/trends/api/widgetdata/multiline"))
        .query(&[
            ("hl", HOST_LANGUAGE),
            ("tz", TIMEZONE_OFFSET),
            ("req", widget_req.as_str()),
            ("token", token.as_str()),
        ]);
    let body = sources.get_text(request).await?;
    average_interest(&body)
}

/// Drop everything before the first `{` (the `)]}'` guard and any newline).
fn strip_guard_prefix(body: &str) -> &str {
    body.find('{').map_or(body, |idx| &body[idx..])
}

/// Extract the `TIMESERIES` widget's token and serialized request.
fn timeseries_widget(body: &str) -> Result<(String, String), SourceError> {
    let explore: ExploreResponse = serde_json::from_str(strip_guard_prefix(body))
        .map_err(|e| SourceError::Deserialize {
            context: "Google Trends explore".to_string(),
            source: e,
        })?;

    let widget = explore
        .widgets
        .into_iter()
        .find(|w| w.id == "TIMESERIES")
        .ok_or_else(|| SourceError::Trends("explore response has no TIMESERIES widget".into()))?;

    match (widget.token, widget.request) {
        (Some(token), Some(request)) => Ok((token, request.to_string())),
        _ => Err(SourceError::Trends(
            "TIMESERIES widget is missing its token or request".into(),
        )),
    }
}

/// Mean of the first series in a multiline timeline.
fn average_interest(body: &str) -> Result<Option<f64>, SourceError> {
    let parsed: MultilineResponse = serde_json::from_str(strip_guard_prefix(body))
        .map_err(|e| SourceError::Deserialize {
            context: "Google Trends multiline".to_string(),
            source: e,
        })?;

    let values: Vec<f64> = parsed
        .default
        .timeline_data
        .iter()
        .filter_map(|point| point.value.first().copied())
        .collect();
    if values.is_empty() {
        return Ok(None);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    Ok(Some(values.iter().sum::<f64>() / count))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn format_trends(trends: &[String]) -> String {
    let lines: Vec<&str> = if trends.is_empty() {
        TRENDS_PLACEHOLDER.to_vec()
    } else {
        trends.iter().map(String::as_str).collect()
    };
    lines
        .iter()
        .take(MAX_RESULTS)
        .map(|trend| format!("- {trend}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("mental health"), "Mental health");
        assert_eq!(capitalize("self-care"), "Self-care");
        assert_eq!(capitalize("YOGA"), "Yoga");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn explore_guard_prefix_is_stripped() {
        let body = r#")]}'
{"widgets":[{"id":"GEO_MAP","token":"x","request":{}},{"id":"TIMESERIES","token":"tok-1","request":{"time":"2025-06-08 2025-06-15"}}]}"#;
        let (token, request) = timeseries_widget(body).unwrap();
        assert_eq!(token, "tok-1");
        assert!(request.contains("2025-06-08 2025-06-15"));
    }

    #[test]
    fn explore_without_timeseries_is_an_error() {
        let body = r#")]}'{"widgets":[{"id":"GEO_MAP","token":"x","request":{}}]}"#;
        assert!(matches!(
            timeseries_widget(body),
            Err(SourceError::Trends(_))
        ));
    }

    #[test]
    fn average_interest_uses_first_series() {
        let body = r#")]}',
{"default":{"timelineData":[{"value":[40]},{"value":[50,1]},{"value":[45]}]}}"#;
        let avg = average_interest(body).unwrap().unwrap();
        assert!((avg - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_timeline_has_no_average() {
        let body = r#")]}',{"default":{"timelineData":[]}}"#;
        assert!(average_interest(body).unwrap().is_none());
    }

    #[test]
    fn no_qualifying_trends_uses_placeholder_lines() {
        let text = format_trends(&[]);
        assert_eq!(
            text,
            "- Mindful eating: 120% rising interest\n- Sleep optimization: 85% rising interest"
        );
    }

    #[test]
    fn trends_are_bulleted() {
        let text = format_trends(&["Sleep: Avg interest 45.2".to_string()]);
        assert_eq!(text, "- Sleep: Avg interest 45.2");
    }
}
