//! PubMed search through NCBI E-utilities: `esearch` for ids, `efetch` for
//! titles, abstracts and publication dates.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use super::{with_summary, SUMMARY_CHARS, UNKNOWN_DATE};
use crate::client::WellnessSources;
use crate::error::SourceError;
use crate::input::{single_line, truncate_with_ellipsis};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Default)]
struct Article {
    title: String,
    abstract_text: String,
    year: String,
    month: String,
    day: String,
    medline_date: String,
}

impl Article {
    fn published(&self) -> String {
        let parts: Vec<&str> = [&self.year, &self.month, &self.day]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if !parts.is_empty() {
            parts.join(" ")
        } else if !self.medline_date.is_empty() {
            self.medline_date.clone()
        } else {
            UNKNOWN_DATE.to_string()
        }
    }

    fn to_line(&self) -> Option<String> {
        let title = single_line(&self.title);
        if title.is_empty() {
            return None;
        }
        let summary = truncate_with_ellipsis(&single_line(&self.abstract_text), SUMMARY_CHARS);
        Some(with_summary(
            format!("PubMed: {title} ({})", self.published()),
            &summary,
        ))
    }
}

pub(super) async fn search(
    sources: &WellnessSources,
    topic: &str,
    limit: usize,
) -> Result<Vec<String>, SourceError> {
    let base = &sources.config.endpoints.pubmed;
    let term = format!("{topic} health");
    let retmax = limit.to_string();

    let request = sources
        .client
        .get(format!("{base}/esearch.fcgi"))
        .query(&[
            ("db", "pubmed"),
            ("term", term.as_str()),
            ("retmax", retmax.as_str()),
            ("retmode", "json"),
            ("sort", "relevance"),
        ]);
    let found: SearchResponse = sources.get_json(request, "PubMed esearch").await?;
    let ids = found.esearchresult.idlist;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let id_list = ids.join(",");
    let request = sources
        .client
        .get(format!("{base}/efetch.fcgi"))
        .query(&[
            ("db", "pubmed"),
            ("id", id_list.as_str()),
            ("retmode", "xml"),
        ]);
    let body = sources.get_text(request).await?;

    Ok(parse_articles(&body)?
        .iter()
        .filter_map(Article::to_line)
        .collect())
}

/// Pull title, abstract and journal publication date out of a
/// `PubmedArticleSet` document.
///
/// Text is kept untrimmed so inline markup (`<i>`, `<sub>`) joins without
/// extra spaces; whitespace is collapsed when the line is built.
fn parse_articles(xml: &str) -> Result<Vec<Article>, SourceError> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut current: Option<Article> = None;
    let mut in_title = false;
    let mut in_abstract = false;
    let mut in_pub_date = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                match name.as_str() {
                    "PubmedArticle" => current = Some(Article::default()),
                    "ArticleTitle" => in_title = true,
                    "AbstractText" => in_abstract = true,
                    "PubDate" => in_pub_date = true,
                    _ => {}
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                match name {
                    "PubmedArticle" => articles.extend(current.take()),
                    "ArticleTitle" => in_title = false,
                    "AbstractText" => {
                        in_abstract = false;
                        if let Some(article) = current.as_mut() {
                            article.abstract_text.push(' ');
                        }
                    }
                    "PubDate" => in_pub_date = false,
                    _ => {}
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                let Some(article) = current.as_mut() else {
                    continue;
                };
                let text = e.unescape().unwrap_or_default().into_owned();
                if in_title {
                    article.title.push_str(&text);
                } else if in_abstract {
                    article.abstract_text.push_str(&text);
                } else if in_pub_date {
                    let value = text.trim().to_string();
                    match current_tag.as_str() {
                        "Year" => article.year = value,
                        "Month" => article.month = value,
                        "Day" => article.day = value,
                        "MedlineDate" => article.medline_date = value,
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Xml(e)),
            _ => {}
        }
    }

    Ok(articles)
}
