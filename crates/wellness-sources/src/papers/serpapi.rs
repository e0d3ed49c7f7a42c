//! SerpAPI Google search for academic papers.

use serde::Deserialize;

use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::input::single_line;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    error: Option<String>,
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
}

pub(super) async fn search(
    sources: &WellnessSources,
    topic: &str,
) -> Result<Vec<String>, SourceError> {
    let api_key = sources
        .config
        .serp_api_key
        .as_deref()
        .ok_or(SourceError::MissingCredential("SERP_API_KEY"))?;
    let query = format!("{topic} academic papers");

    let request = sources
        .client
        .get(format!("{}/search.json", sources.config.endpoints.serpapi))
        .query(&[
            ("engine", "google"),
            ("q", query.as_str()),
            ("location", "Austin, Texas, United States"),
            ("hl", "en"),
            ("gl", "us"),
            ("google_domain", "google.com"),
            ("api_key", api_key),
        ]);
    let response: SearchResponse = sources.get_json(request, "SerpAPI search").await?;
    to_lines(response)
}

fn to_lines(response: SearchResponse) -> Result<Vec<String>, SourceError> {
    // SerpAPI reports quota and key problems in a 200 body.
    if let Some(message) = response.error {
        return Err(SourceError::SerpApi(message));
    }

    Ok(response
        .organic_results
        .into_iter()
        .map(|result| {
            let title = result
                .title
                .map(|t| single_line(&t))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown Title".to_string());
            let link = result.link.unwrap_or_else(|| "No Link".to_string());
            format!("SerpAPI: {title} | Link: {link}")
        })
        .collect())
}
