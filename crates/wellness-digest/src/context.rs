//! Assembles the adapter outputs into the text context handed to the model.

use wellness_sources::{SourceOutputs, MAX_RESULTS};

/// Social posts first, then forum posts; blank lines dropped, capped at five.
#[must_use]
pub fn merge_social_buzz(social: &str, forum: &str) -> String {
    social
        .lines()
        .chain(forum.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_RESULTS)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Three labeled sections, always in this order, whatever the adapters said.
#[must_use]
pub fn assemble_context(outputs: &SourceOutputs) -> String {
    let buzz = merge_social_buzz(&outputs.social_posts, &outputs.forum_posts);
    format!(
        "POPULAR TRENDS:\n{}\n\nSOCIAL BUZZ:\n{buzz}\n\nNOTABLE INSIGHTS:\n{}",
        outputs.trends, outputs.papers
    )
}
