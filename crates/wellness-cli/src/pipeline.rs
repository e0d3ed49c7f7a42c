//! The digest run: resolve dates, collect sources, summarize, render.
//!
//! Adapter failures never reach this layer (each adapter substitutes its
//! fallback text). Everything else is fatal and comes back as a
//! [`PipelineError`] tagged with the stage that failed.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wellness_core::{AppConfig, ConfigError, DateRange};
use wellness_digest::{
    assemble_context, render_html, render_pdf, write_html, DigestError, LlmClient, LlmConfig,
    SummaryGenerator, HTML_FILE_NAME, PDF_FILE_NAME,
};
use wellness_sources::{SourceError, SourcesConfig, WellnessSources};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PipelineStage {
    Config,
    Model,
    Summary,
    Html,
    Pdf,
}

impl PipelineStage {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Model => "model",
            Self::Summary => "summary",
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub(crate) enum StageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Digest(#[from] DigestError),
}

#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub(crate) struct PipelineError {
    pub(crate) stage: PipelineStage,
    #[source]
    pub(crate) source: StageError,
}

impl PipelineError {
    pub(crate) fn new(stage: PipelineStage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// Classify a generator failure: bad model output versus a failed call.
    fn from_generation(err: DigestError) -> Self {
        let stage = match err {
            DigestError::SummaryParse(_) => PipelineStage::Summary,
            DigestError::MissingApiKey => PipelineStage::Config,
            _ => PipelineStage::Model,
        };
        Self::new(stage, err)
    }

    /// What the operator should check next.
    pub(crate) fn hint(&self) -> &'static str {
        match self.stage {
            PipelineStage::Config => {
                "Check .env: OPENROUTER_API_KEY must be set and numeric settings must parse."
            }
            PipelineStage::Model => {
                "Model API error: check OPENROUTER_API_KEY, WELLNESS_LLM_BASE_URL and WELLNESS_LLM_MODEL."
            }
            PipelineStage::Summary => {
                "The model did not return a valid summary JSON object. Rerun, or pick another WELLNESS_LLM_MODEL."
            }
            PipelineStage::Html => "Could not write the HTML digest. Check that the output directory exists and is writable.",
            PipelineStage::Pdf => {
                "PDF conversion failed. Check WELLNESS_WKHTMLTOPDF_PATH, or rerun with --skip-pdf."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DigestOptions {
    pub(crate) topic: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) wkhtmltopdf_path: PathBuf,
    pub(crate) skip_pdf: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DigestArtifacts {
    pub(crate) html_path: PathBuf,
    pub(crate) pdf_path: Option<PathBuf>,
}

/// Build the source adapters from application config.
pub(crate) fn build_sources(config: &AppConfig) -> Result<WellnessSources, PipelineError> {
    WellnessSources::new(SourcesConfig::from_app_config(config))
        .map_err(|e| PipelineError::new(PipelineStage::Config, e))
}

/// Build the summary generator; fails when the model key is missing.
pub(crate) fn build_generator(config: &AppConfig) -> Result<SummaryGenerator, PipelineError> {
    let llm = LlmConfig::from_app_config(config)
        .map_err(|e| PipelineError::new(PipelineStage::Config, e))?;
    let client = LlmClient::new(llm).map_err(|e| PipelineError::new(PipelineStage::Model, e))?;
    Ok(SummaryGenerator::new(client))
}

/// Run every adapter once and assemble the model context.
pub(crate) async fn collect_context(
    sources: &WellnessSources,
    range: &DateRange,
    topic: &str,
) -> String {
    let outputs = sources.collect(range, topic).await;
    assemble_context(&outputs)
}

/// The full digest: context, summary, HTML, then PDF unless skipped.
///
/// The HTML file is written before PDF conversion starts, so a PDF failure
/// leaves the HTML on disk and still fails the run.
pub(crate) async fn run_digest(
    sources: &WellnessSources,
    generator: &SummaryGenerator,
    range: &DateRange,
    options: &DigestOptions,
) -> Result<DigestArtifacts, PipelineError> {
    let context = collect_context(sources, range, &options.topic).await;
    tracing::debug!(chars = context.chars().count(), "assembled context");

    let summary = generator
        .generate(range, &context)
        .await
        .map_err(PipelineError::from_generation)?;
    tracing::info!(
        trends = summary.popular_trends.len(),
        buzz = summary.social_buzz.len(),
        insights = summary.notable_insights.len(),
        "summary parsed"
    );

    let html = render_html(&summary);
    let html_path = options.output_dir.join(HTML_FILE_NAME);
    write_html(&html_path, &html).map_err(|e| PipelineError::new(PipelineStage::Html, e))?;
    tracing::info!(path = %html_path.display(), "HTML digest written");

    if options.skip_pdf {
        return Ok(DigestArtifacts {
            html_path,
            pdf_path: None,
        });
    }

    let pdf_path = options.output_dir.join(PDF_FILE_NAME);
    render_pdf(&options.wkhtmltopdf_path, &html, &pdf_path)
        .await
        .map_err(|e| PipelineError::new(PipelineStage::Pdf, e))?;
    tracing::info!(path = %pdf_path.display(), "PDF digest written");

    Ok(DigestArtifacts {
        html_path,
        pdf_path: Some(pdf_path),
    })
}

/// Names of the written files, for the success line.
pub(crate) fn describe_artifacts(artifacts: &DigestArtifacts) -> String {
    let name = |path: &Path| {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    };
    match &artifacts.pdf_path {
        Some(pdf) => format!(
            "'{}' and '{}'",
            name(&artifacts.html_path),
            name(pdf)
        ),
        None => format!("'{}'", name(&artifacts.html_path)),
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
