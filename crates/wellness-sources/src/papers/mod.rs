//! Research paper search across a chain of academic sources.
//!
//! Sources are tried in a fixed order until five findings are collected. Each
//! source is independent: its failure is logged and the chain moves on.

mod arxiv;
mod pubmed;
mod semantic_scholar;
mod serpapi;

use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::fallback::NO_PAPERS;
use crate::input::{parse_date_range, parse_topic};
use crate::MAX_RESULTS;

/// Paper summaries are cut to this many characters.
pub(crate) const SUMMARY_CHARS: usize = 200;
pub(crate) const UNKNOWN_DATE: &str = "Unknown Date";

/// Append ` — <summary>` to a paper heading when there is a summary.
pub(crate) fn with_summary(heading: String, summary: &str) -> String {
    if summary.is_empty() {
        heading
    } else {
        format!("{heading} — {summary}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaperSource {
    Arxiv,
    PubMed,
    SerpApi,
    SemanticScholar,
}

/// Priority order of the chain.
const CHAIN: [PaperSource; 4] = [
    PaperSource::Arxiv,
    PaperSource::PubMed,
    PaperSource::SerpApi,
    PaperSource::SemanticScholar,
];

impl PaperSource {
    fn as_str(self) -> &'static str {
        match self {
            PaperSource::Arxiv => "arxiv",
            PaperSource::PubMed => "pubmed",
            PaperSource::SerpApi => "serpapi",
            PaperSource::SemanticScholar => "semantic_scholar",
        }
    }

    async fn fetch(
        self,
        sources: &WellnessSources,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<String>, SourceError> {
        match self {
            PaperSource::Arxiv => arxiv::search(sources, topic, limit).await,
            PaperSource::PubMed => pubmed::search(sources, topic, limit).await,
            PaperSource::SerpApi => serpapi::search(sources, topic).await,
            PaperSource::SemanticScholar => semantic_scholar::search(sources, topic, limit).await,
        }
    }
}

pub(crate) async fn fetch_research_papers(
    sources: &WellnessSources,
    input: &str,
) -> Result<String, SourceError> {
    // The date pair is validated like every adapter's input; the searches
    // themselves rank by relevance and recency rather than filtering by date.
    parse_date_range(input)?;
    let topic = parse_topic(input);

    let mut results: Vec<String> = Vec::new();
    for source in CHAIN {
        let remaining = MAX_RESULTS.saturating_sub(results.len());
        if remaining == 0 {
            break;
        }

        match source.fetch(sources, &topic, remaining).await {
            Ok(found) => {
                tracing::debug!(
                    source = source.as_str(),
                    count = found.len(),
                    "collected papers"
                );
                results.extend(found.into_iter().take(remaining));
            }
            Err(e) => {
                tracing::warn!(
                    source = source.as_str(),
                    error = %e,
                    "paper source failed; continuing chain"
                );
            }
        }
    }

    if results.is_empty() {
        Ok(NO_PAPERS.to_string())
    } else {
        Ok(results.join("\n"))
    }
}
