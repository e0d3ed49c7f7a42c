//! HTML rendering of a [`WellnessSummary`].

use std::fmt::Write as _;
use std::path::Path;

use wellness_core::{WellnessInsight, WellnessSummary};

use crate::error::DigestError;

pub const HTML_FILE_NAME: &str = "wellness_summary.html";
pub const PDF_FILE_NAME: &str = "wellness_summary.pdf";

const STYLE: &str = "\
body { font-family: 'Segoe UI', sans-serif; padding: 30px; color: #333; line-height: 1.6; }
h1 { color: #34a853; }
h2 { border-bottom: 1px solid #ddd; padding-bottom: 5px; }
.section { margin-bottom: 30px; }
.insight { margin-bottom: 20px; }
a { color: #34a853; text-decoration: underline; }";

#[must_use]
pub fn render_html(summary: &WellnessSummary) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<html>\n<head>\n<meta charset='UTF-8'>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>🌿 Wellness Digest: {}</h1>\n",
        escape_html(&summary.time_period)
    );

    html.push_str("<div class='section'><h2>📈 What's Trending Online</h2>\n<ul>\n");
    for trend in &summary.popular_trends {
        html.push_str(&trend_item(trend));
        html.push('\n');
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class='section'><h2>💬 What People Are Saying</h2>\n<ul>\n");
    for buzz in &summary.social_buzz {
        let _ = writeln!(html, "<li>{}</li>", escape_html(buzz));
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class='section'><h2>📚 What Research Says</h2>\n");
    for insight in &summary.notable_insights {
        html.push_str(&insight_block(insight));
    }
    html.push_str("</div>\n");

    let _ = write!(
        html,
        "<div class='section'><h2>🧠 Recommendations</h2><p>{}</p></div>\n\
         <div class='section'><h2>🌟 Wellness in the Spotlight</h2><p>{}</p></div>\n\
         </body>\n</html>\n",
        escape_html(&summary.lifestyle_recommendations),
        escape_html(&summary.future_outlook)
    );
    html
}

/// `label: rest` becomes a bolded label; anything without a colon is a plain item.
fn trend_item(trend: &str) -> String {
    match trend.split_once(':') {
        Some((label, rest)) => format!(
            "<li><strong>{}</strong>: {}</li>",
            escape_html(label),
            escape_html(rest.trim())
        ),
        None => format!("<li>{}</li>", escape_html(trend)),
    }
}

fn insight_block(insight: &WellnessInsight) -> String {
    let source = escape_html(&normalize_source_url(&insight.source));
    format!(
        "<div class='insight'>\n\
         <strong>{} - {}</strong>\n\
         <p>{}</p>\n\
         <p><em>Impact:</em> {}</p>\n\
         <p><strong>Category:</strong> {}</p>\n\
         <p><strong>Source:</strong> <a href=\"{source}\" target=\"_blank\" rel=\"noopener noreferrer\">{source}</a></p>\n\
         </div>\n",
        escape_html(&insight.date),
        escape_html(&insight.title),
        escape_html(&insight.description),
        escape_html(&insight.impact),
        escape_html(&insight.category),
    )
}

/// Prefix `https://` onto sources that lack a scheme. Empty stays empty.
#[must_use]
pub fn normalize_source_url(source: &str) -> String {
    if source.is_empty() || source.starts_with("http://") || source.starts_with("https://") {
        source.to_string()
    } else {
        format!("https://{source}")
    }
}

#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Write the rendered page as UTF-8, replacing any previous file.
///
/// # Errors
///
/// Returns [`DigestError::Io`] if the file cannot be written.
pub fn write_html(path: &Path, html: &str) -> Result<(), DigestError> {
    std::fs::write(path, html).map_err(|source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
