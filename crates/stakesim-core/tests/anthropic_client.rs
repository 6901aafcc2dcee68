//! Integration tests for AnthropicClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover request shape (path, headers,
//! body), response text extraction, and status/error mapping through the engine.

use std::sync::Arc;

use serde_json::json;
use stakesim_core::providers::llm::anthropic::AnthropicClient;
use stakesim_core::providers::llm::{build_client, LlmClient};
use stakesim_core::{Conversation, GradingConfig, GradingEngine, GradingError, Persona, Rubric, Turn};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> GradingConfig {
    GradingConfig::default()
        .with_api_key("sk-test")
        .with_base_url(server.uri())
}

fn messages_reply(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-20250514",
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 1200, "output_tokens": 340}
    })
}

#[tokio::test]
async fn test_complete_sends_messages_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-20250514",
            "max_tokens": 3000,
            "system": "Respond only with JSON.",
            "messages": [{"role": "user", "content": "grade this"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages_reply("{\"ok\": true}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnthropicClient::from_config(&test_config(&server)).expect("client");
    let system = vec!["Respond only with JSON.".to_string()];
    let resp = client
        .complete("grade this", Some(&system[..]))
        .await
        .expect("complete failed");

    assert_eq!(resp.text, "{\"ok\": true}");
    assert_eq!(resp.provider, "anthropic");
    assert_eq!(resp.model, "claude-sonnet-4-20250514");
    assert_eq!(resp.meta["usage"]["output_tokens"], 340);
}

#[tokio::test]
async fn test_complete_error_status_includes_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = AnthropicClient::from_config(&test_config(&server)).expect("client");
    let err = client.complete("p", None).await.unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("529"), "got: {}", msg);
    assert!(msg.contains("overloaded"), "got: {}", msg);
}

#[tokio::test]
async fn test_complete_missing_content_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let client = AnthropicClient::from_config(&test_config(&server)).expect("client");
    let err = client.complete("p", None).await.unwrap_err();
    assert!(err.to_string().contains("missing content text"));
}

#[test]
fn test_missing_api_key_is_config_error() {
    let cfg = GradingConfig::default();
    let cfg = GradingConfig {
        api_key: None,
        ..cfg
    };
    match AnthropicClient::from_config(&cfg) {
        Err(GradingError::Config { message }) => assert!(message.contains("ANTHROPIC_API_KEY")),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("expected config error"),
    }
}

#[tokio::test]
async fn test_engine_maps_http_failure_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let client = build_client(&cfg).expect("client");
    let engine = GradingEngine::new(cfg, Arc::clone(&client));

    let conversation = Conversation::completed(
        "Demand forecast",
        vec![Turn::stakeholder("Why should I care?"), Turn::student("It cuts stockouts.")],
    );
    let persona = Persona {
        name: "Sam".to_string(),
        title: "CFO".to_string(),
        background: None,
    };
    let rubric: Rubric = serde_yaml::from_str(
        "name: Basic\ncriteria:\n  - name: clarity\n    display_name: Clarity\n    max_points: 10\n",
    )
    .expect("rubric yaml");

    let err = engine
        .grade(&rubric, &persona, &conversation)
        .await
        .unwrap_err();
    assert!(matches!(err, GradingError::Provider { .. }));
    assert_eq!(err.exit_code(), 5);
    assert!(err.to_string().contains("500"));
}
