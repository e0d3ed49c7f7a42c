//! Semantic Scholar graph API paper search (public, unauthenticated).

use serde::Deserialize;

use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::input::single_line;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
struct Paper {
    title: Option<String>,
}

pub(super) async fn search(
    sources: &WellnessSources,
    topic: &str,
    limit: usize,
) -> Result<Vec<String>, SourceError> {
    let limit = limit.to_string();
    let request = sources
        .client
        .get(format!(
            "{}/graph/v1/paper/search",
            sources.config.endpoints.semantic_scholar
        ))
        .query(&[
            ("query", topic),
            ("limit", limit.as_str()),
            ("fields", "title"),
        ]);
    let response: SearchResponse = sources
        .get_json(request, "Semantic Scholar paper search")
        .await?;

    Ok(response
        .data
        .into_iter()
        .map(|paper| {
            let title = paper
                .title
                .map(|t| single_line(&t))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown Title".to_string());
            format!("Semantic Scholar: {title}")
        })
        .collect())
}
