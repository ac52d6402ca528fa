use std::sync::Once;

use clipper_core::{CandidateUrl, ResolvedUrl, TitleRecord};
use clipper_engine::{build_page_payload, NotionSink, SinkConfig, SinkError, TitleSink};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(clipper_logging::initialize_for_tests);
}

fn record(title: &str, url: &str) -> TitleRecord {
    let candidate = CandidateUrl::parse(url).expect("test url parses");
    TitleRecord::new(title, ResolvedUrl::unchanged(&candidate))
}

fn config_for(server: &MockServer) -> SinkConfig {
    SinkConfig {
        endpoint: format!("{}/v1/pages", server.uri()),
        ..SinkConfig::new(Some("secret_token".to_string()), Some("db-123".to_string()))
    }
}

#[test]
fn payload_has_fixed_page_schema() {
    let record = record("Rust blog", "https://blog.rust-lang.org/");

    let payload = build_page_payload("db-123", &record);

    assert_eq!(
        payload,
        json!({
            "parent": { "database_id": "db-123" },
            "properties": {
                "order": { "checkbox": false },
                "URL": { "url": "https://blog.rust-lang.org/" },
                "Tags": { "multi_select": [] },
                "Name": { "title": [ { "text": { "content": "Rust blog" } } ] }
            },
            "children": [
                {
                    "object": "block",
                    "bookmark": { "caption": [], "url": "https://blog.rust-lang.org/" }
                }
            ]
        })
    );
}

#[tokio::test]
async fn submits_page_with_credentials_and_version() {
    init_logging();
    let server = MockServer::start().await;
    let record = record("周末露营清单", "https://www.xiaohongshu.com/explore/1");
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(header("Authorization", "Bearer secret_token"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(body_json(build_page_payload("db-123", &record)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "page" })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = NotionSink::new(config_for(&server)).expect("client builds");
    sink.submit(&record).await.expect("submit ok");
}

#[tokio::test]
async fn rejected_page_reports_status_and_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .respond_with(ResponseTemplate::new(400).set_body_string("validation_error"))
        .mount(&server)
        .await;

    let sink = NotionSink::new(config_for(&server)).expect("client builds");
    let err = sink
        .submit(&record("t", "https://example.com/"))
        .await
        .unwrap_err();

    match err {
        SinkError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "validation_error");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_credentials_fail_without_request() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = SinkConfig {
        endpoint: format!("{}/v1/pages", server.uri()),
        ..SinkConfig::new(Some("secret_token".to_string()), None)
    };
    let sink = NotionSink::new(config).expect("client builds");
    let err = sink
        .submit(&record("t", "https://example.com/"))
        .await
        .unwrap_err();

    assert!(
        matches!(&err, SinkError::NotConfigured(missing) if missing == "NOTION_DATABASE_ID"),
        "{err}"
    );
}
