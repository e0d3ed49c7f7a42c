//! Parsing of the combined instruction strings adapters receive, plus the
//! text-shaping helpers every adapter shares.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use wellness_core::date_range::DATE_FORMAT;
use wellness_core::DateRange;

use crate::error::SourceError;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date regex"));

static TOPIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("valid topic regex")
});

/// Topic used by the paper adapter when the instruction names none.
pub const DEFAULT_TOPIC: &str = "wellness";

/// Extract the two ISO dates embedded in an instruction string.
///
/// # Errors
///
/// Returns [`SourceError::InvalidInput`] unless exactly two valid calendar
/// dates are present with the first not after the second.
pub fn parse_date_range(input: &str) -> Result<DateRange, SourceError> {
    let found: Vec<&str> = DATE_RE.find_iter(input).map(|m| m.as_str()).collect();
    let [start, end] = found.as_slice() else {
        return Err(SourceError::InvalidInput(format!(
            "expected two dates, found {}",
            found.len()
        )));
    };

    let parse = |raw: &str| {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| SourceError::InvalidInput(format!("bad date '{raw}': {e}")))
    };
    let start = parse(*start)?;
    let end = parse(*end)?;
    if start > end {
        return Err(SourceError::InvalidInput(format!(
            "start date {start} is after end date {end}"
        )));
    }

    Ok(DateRange { start, end })
}

/// Extract the first quoted topic from an instruction string, falling back to
/// [`DEFAULT_TOPIC`].
#[must_use]
pub fn parse_topic(input: &str) -> String {
    TOPIC_RE
        .captures(input)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim())
        .filter(|topic| !topic.is_empty())
        .unwrap_or(DEFAULT_TOPIC)
        .to_string()
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Collapse a piece of free text onto a single line.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
