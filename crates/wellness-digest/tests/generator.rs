//! Summary generator tests against a mock chat-completions endpoint.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellness_core::{DateRange, WellnessInsight, WellnessSummary};
use wellness_digest::{DigestError, LlmClient, LlmConfig, SummaryGenerator};

const CONTEXT: &str = "POPULAR TRENDS:\n- Sleep: Avg interest 45.2\n\n\
                       SOCIAL BUZZ:\nNo recent buzz.\n\n\
                       NOTABLE INSIGHTS:\nSemantic Scholar: Sleep and mood";

/// Matches only the tool-offer request.
const TOOL_PASS: &str = r#""tool_choice":"auto""#;
/// Matches only the final request (its human turn has no trailing period).
const FINAL_PASS: &str = r#""content":"Generate the wellness summary"}"#;

fn generator(server: &MockServer) -> SummaryGenerator {
    let config = LlmConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/api/v1", server.uri()),
        model: "test/model".to_string(),
        temperature: 0.6,
        timeout_secs: 5,
    };
    SummaryGenerator::new(LlmClient::new(config).expect("client"))
}

fn range() -> DateRange {
    DateRange::last_week(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

fn expected_summary() -> WellnessSummary {
    WellnessSummary {
        time_period: "2025-06-08 to 2025-06-15".to_string(),
        popular_trends: vec!["Sleep: Avg interest 45.2".to_string()],
        social_buzz: vec!["No recent buzz.".to_string()],
        notable_insights: vec![WellnessInsight {
            date: "2025-06-12".to_string(),
            title: "Sleep and mood".to_string(),
            description: "Sleep quality tracks next-day mood.".to_string(),
            impact: "Prioritize consistent bedtimes.".to_string(),
            source: "api.semanticscholar.org".to_string(),
            category: "Sleep".to_string(),
        }],
        lifestyle_recommendations: "Keep a regular sleep schedule.".to_string(),
        future_outlook: "Sleep stays in focus.".to_string(),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn mount_tool_pass(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(body_string_contains(TOOL_PASS))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_final_pass(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains(FINAL_PASS))
        .and(body_string_contains("POPULAR TRENDS:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn schema_matching_reply_round_trips() {
    let server = MockServer::start().await;
    let expected = expected_summary();
    mount_tool_pass(
        &server,
        ResponseTemplate::new(200).set_body_json(completion("")),
    )
    .await;
    mount_final_pass(&server, &serde_json::to_string(&expected).unwrap()).await;

    let summary = generator(&server).generate(&range(), CONTEXT).await.unwrap();
    assert_eq!(summary, expected);
}

#[tokio::test]
async fn requested_tool_calls_are_not_fatal_and_fences_are_stripped() {
    let server = MockServer::start().await;
    mount_tool_pass(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "GetWellnessTrends",
                            "arguments": "{\"input\":\"2025-06-08 2025-06-15\"}"
                        }
                    }]
                }
            }]
        })),
    )
    .await;
    let fenced = format!(
        "```json\n{}\n```",
        serde_json::to_string_pretty(&expected_summary()).unwrap()
    );
    mount_final_pass(&server, &fenced).await;

    let summary = generator(&server).generate(&range(), CONTEXT).await.unwrap();
    assert_eq!(summary, expected_summary());
}

#[tokio::test]
async fn fenced_reply_after_a_preamble_is_accepted() {
    let server = MockServer::start().await;
    mount_tool_pass(&server, ResponseTemplate::new(200).set_body_json(completion(""))).await;
    let reply = format!(
        "Here is the wellness summary:\n```json\n{}\n```\nLet me know if you need more.",
        serde_json::to_string_pretty(&expected_summary()).unwrap()
    );
    mount_final_pass(&server, &reply).await;

    let summary = generator(&server).generate(&range(), CONTEXT).await.unwrap();
    assert_eq!(summary, expected_summary());
}

#[tokio::test]
async fn failed_tool_pass_does_not_abort() {
    let server = MockServer::start().await;
    mount_tool_pass(
        &server,
        ResponseTemplate::new(400).set_body_string("tools not supported"),
    )
    .await;
    mount_final_pass(
        &server,
        &serde_json::to_string(&expected_summary()).unwrap(),
    )
    .await;

    let summary = generator(&server).generate(&range(), CONTEXT).await.unwrap();
    assert_eq!(summary, expected_summary());
}

#[tokio::test]
async fn prose_reply_is_a_summary_parse_error() {
    let server = MockServer::start().await;
    mount_tool_pass(&server, ResponseTemplate::new(200).set_body_json(completion(""))).await;
    mount_final_pass(&server, "Sure! Here's a lovely wellness summary for you.").await;

    let result = generator(&server).generate(&range(), CONTEXT).await;
    assert!(matches!(result, Err(DigestError::SummaryParse(_))));
}

#[tokio::test]
async fn reply_missing_a_field_is_a_summary_parse_error() {
    let server = MockServer::start().await;
    let mut value = serde_json::to_value(expected_summary()).unwrap();
    value.as_object_mut().unwrap().remove("notable_insights");
    mount_tool_pass(&server, ResponseTemplate::new(200).set_body_json(completion(""))).await;
    mount_final_pass(&server, &value.to_string()).await;

    let err = generator(&server)
        .generate(&range(), CONTEXT)
        .await
        .unwrap_err();
    assert!(matches!(err, DigestError::SummaryParse(_)));
    assert!(err.to_string().contains("notable_insights"));
}

#[tokio::test]
async fn empty_final_reply_is_a_summary_parse_error() {
    let server = MockServer::start().await;
    mount_tool_pass(&server, ResponseTemplate::new(200).set_body_json(completion(""))).await;
    mount_final_pass(&server, "   ").await;

    let result = generator(&server).generate(&range(), CONTEXT).await;
    assert!(matches!(result, Err(DigestError::SummaryParse(_))));
}

#[tokio::test]
async fn rejected_final_request_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(2)
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate(&range(), CONTEXT)
        .await
        .unwrap_err();
    match err {
        DigestError::Llm { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid key");
        }
        other => panic!("expected Llm error, got {other:?}"),
    }
}
