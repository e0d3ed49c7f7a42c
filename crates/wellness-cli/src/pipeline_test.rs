use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellness_digest::{LlmClient, LlmConfig, SummaryGenerator};
use wellness_sources::fallback::{
    FORUM_FALLBACK, NO_PAPERS, SOCIAL_FALLBACK, TRENDS_FALLBACK,
};
use wellness_sources::{SourcesConfig, WellnessSources};

use super::*;

const CHAT_PATH: &str = "/api/v1/chat/completions";

fn summary_json() -> String {
    json!({
        "time_period": "2025-06-08 to 2025-06-15",
        "popular_trends": ["Mindful eating: 120% rising interest", "Cold plunges"],
        "social_buzz": ["Walking is back"],
        "notable_insights": [{
            "date": "2025-06-12",
            "title": "Sleep and mood",
            "description": "Sleep quality tracks next-day mood.",
            "impact": "Prioritize consistent bedtimes.",
            "source": "example.com/paper",
            "category": "Sleep"
        }],
        "lifestyle_recommendations": "Keep a regular sleep schedule.",
        "future_outlook": "Sleep stays in focus."
    })
    .to_string()
}

fn completion(content: &str) -> serde_json::Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn range() -> DateRange {
    DateRange::last_week(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

/// Every source endpoint points at a server that knows none of them.
fn failing_sources(server: &MockServer) -> WellnessSources {
    WellnessSources::new(SourcesConfig::offline(&server.uri())).expect("sources")
}

fn generator(server: &MockServer) -> SummaryGenerator {
    let config = LlmConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/api/v1", server.uri()),
        model: "test/model".to_string(),
        temperature: 0.6,
        timeout_secs: 5,
    };
    SummaryGenerator::new(LlmClient::new(config).expect("llm client"))
}

fn options(dir: &Path, skip_pdf: bool) -> DigestOptions {
    DigestOptions {
        topic: "wellness research".to_string(),
        output_dir: dir.to_path_buf(),
        wkhtmltopdf_path: dir.join("no-such-wkhtmltopdf"),
        skip_pdf,
    }
}

async fn mount_model(server: &MockServer, final_content: &str) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains(r#""tool_choice":"auto""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("NOTABLE INSIGHTS:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(final_content)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn all_sources_failing_still_produces_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains(TRENDS_FALLBACK))
        .and(body_string_contains(SOCIAL_FALLBACK))
        .and(body_string_contains(NO_PAPERS))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&summary_json())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains(r#""tool_choice":"auto""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifacts = run_digest(
        &failing_sources(&server),
        &generator(&server),
        &range(),
        &options(dir.path(), true),
    )
    .await
    .expect("digest should succeed on fallback context");

    assert_eq!(artifacts.html_path, dir.path().join(HTML_FILE_NAME));
    assert!(artifacts.pdf_path.is_none());

    let html = std::fs::read_to_string(&artifacts.html_path).unwrap();
    assert!(html.contains("Wellness Digest: 2025-06-08 to 2025-06-15"));
    assert!(html.contains("<li><strong>Mindful eating</strong>: 120% rising interest</li>"));
    assert!(html.contains("href=\"https://example.com/paper\""));
    assert!(!dir.path().join(PDF_FILE_NAME).exists());
}

#[tokio::test]
async fn fallback_context_has_every_section() {
    let server = MockServer::start().await;
    let context = collect_context(&failing_sources(&server), &range(), "sleep").await;

    assert!(context.starts_with(&format!("POPULAR TRENDS:\n{TRENDS_FALLBACK}\n\nSOCIAL BUZZ:\n")));
    assert!(context.ends_with(&format!("NOTABLE INSIGHTS:\n{NO_PAPERS}")));

    let buzz = context
        .split("SOCIAL BUZZ:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nNOTABLE INSIGHTS:").next())
        .unwrap();
    let first_forum_line = FORUM_FALLBACK.lines().next().unwrap();
    assert_eq!(buzz.lines().next(), Some(SOCIAL_FALLBACK));
    assert_eq!(buzz.lines().nth(1), Some(first_forum_line));
    assert_eq!(buzz.lines().count(), 5);
}

#[tokio::test]
async fn invalid_summary_fails_without_writing_files() {
    let server = MockServer::start().await;
    mount_model(&server, "I could not find enough data for a summary.").await;

    let dir = tempfile::tempdir().unwrap();
    let err = run_digest(
        &failing_sources(&server),
        &generator(&server),
        &range(),
        &options(dir.path(), false),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, PipelineStage::Summary);
    assert!(!dir.path().join(HTML_FILE_NAME).exists());
    assert!(!dir.path().join(PDF_FILE_NAME).exists());
}

#[tokio::test]
async fn model_outage_is_a_model_stage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = run_digest(
        &failing_sources(&server),
        &generator(&server),
        &range(),
        &options(dir.path(), true),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, PipelineStage::Model);
    assert!(err.to_string().contains("503"));
    assert!(!dir.path().join(HTML_FILE_NAME).exists());
}

#[tokio::test]
async fn pdf_failure_keeps_html_and_fails_the_run() {
    let server = MockServer::start().await;
    mount_model(&server, &summary_json()).await;

    let dir = tempfile::tempdir().unwrap();
    let err = run_digest(
        &failing_sources(&server),
        &generator(&server),
        &range(),
        &options(dir.path(), false),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, PipelineStage::Pdf);
    assert!(dir.path().join(HTML_FILE_NAME).exists());
    assert!(!dir.path().join(PDF_FILE_NAME).exists());
}

#[tokio::test]
async fn unwritable_output_dir_is_an_html_stage_error() {
    let server = MockServer::start().await;
    mount_model(&server, &summary_json()).await;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = run_digest(
        &failing_sources(&server),
        &generator(&server),
        &range(),
        &options(&missing, true),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, PipelineStage::Html);
}

#[test]
fn missing_api_key_is_a_config_stage_error() {
    let err = PipelineError::from_generation(DigestError::MissingApiKey);
    assert_eq!(err.stage, PipelineStage::Config);
    assert!(err.hint().contains("OPENROUTER_API_KEY"));
}

#[test]
fn each_stage_has_its_own_hint() {
    let stages = [
        PipelineStage::Config,
        PipelineStage::Model,
        PipelineStage::Summary,
        PipelineStage::Html,
        PipelineStage::Pdf,
    ];
    let hints: Vec<&str> = stages
        .iter()
        .map(|&stage| PipelineError::new(stage, DigestError::Pdf("x".to_string())).hint())
        .collect();
    for (i, hint) in hints.iter().enumerate() {
        assert!(!hint.is_empty());
        assert!(hints[i + 1..].iter().all(|other| other != hint));
    }
    assert!(hints[4].contains("--skip-pdf"));
}

#[test]
fn error_display_names_the_stage() {
    let err = PipelineError::new(
        PipelineStage::Summary,
        DigestError::SummaryParse("missing field `future_outlook`".to_string()),
    );
    assert_eq!(
        err.to_string(),
        "summary stage failed: model output is not a valid wellness summary: missing field `future_outlook`"
    );
}

#[test]
fn artifacts_are_described_by_file_name() {
    let both = DigestArtifacts {
        html_path: PathBuf::from("/out/wellness_summary.html"),
        pdf_path: Some(PathBuf::from("/out/wellness_summary.pdf")),
    };
    assert_eq!(
        describe_artifacts(&both),
        "'wellness_summary.html' and 'wellness_summary.pdf'"
    );

    let html_only = DigestArtifacts {
        pdf_path: None,
        ..both
    };
    assert_eq!(describe_artifacts(&html_only), "'wellness_summary.html'");
}
