//! Integration tests for AnswerClient against a mock answering service

use answer_client::{AnswerClient, AnsweringService, QueryError, QueryRequest};
use chat_core::Config;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnswerClient {
    let config = Config {
        api_base: server.uri(),
        ..Config::default()
    };
    AnswerClient::new(&config).expect("client")
}

#[tokio::test]
async fn test_query_posts_question_with_null_doc_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(serde_json::json!({
            "question": "Who is liable?",
            "doc_type": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "The tenant.",
            "sources": ["lease.pdf", "statute.pdf"],
            "cache_hit": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .query(&QueryRequest::new("Who is liable?"))
        .await
        .expect("query should succeed");

    assert_eq!(response.answer, "The tenant.");
    assert_eq!(response.sources, vec!["lease.pdf", "statute.pdf"]);
    assert!(response.cache_hit);
}

#[tokio::test]
async fn test_query_without_cache_hit_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "A",
            "sources": []
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .query(&QueryRequest::new("q"))
        .await
        .expect("query should succeed");

    assert_eq!(response.answer, "A");
    assert!(response.sources.is_empty());
    assert!(!response.cache_hit);
}

#[tokio::test]
async fn test_error_body_becomes_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .query(&QueryRequest::new("q"))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::Server { status: 404, .. }));
    assert_eq!(err.detail().as_deref(), Some("Not found"));
}

#[tokio::test]
async fn test_empty_error_body_has_no_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .query(&QueryRequest::new("q"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .query(&QueryRequest::new("q"))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::Decode(_)));
    assert!(err.detail().is_some());
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let health = client_for(&mock_server).health().await.expect("health");
    assert!(health.is_ok());
}

#[tokio::test]
async fn test_health_reports_unavailable_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("index loading"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).health().await.unwrap_err();
    assert!(matches!(err, QueryError::Server { status: 503, .. }));
    assert_eq!(err.detail().as_deref(), Some("index loading"));
}
