use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use stackref::StackError;
use stackref::advisor::Advisor;
use stackref::ai::{AiService, GeminiClient, GenerativeClient, MemoryCredentialStore};

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(&server.url("/v1beta"), Duration::from_secs(2)).unwrap()
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[test]
fn test_generate_content_request_shape() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent")
            .header("x-goog-api-key", "secret")
            .json_body(json!({"contents": [{"parts": [{"text": "Hello"}]}]}));
        then.status(200).json_body(text_reply("Hi there"));
    });

    let text = client(&server)
        .generate_content("secret", "gemini-2.5-flash", "Hello")
        .unwrap();
    assert_eq!(text, "Hi there");
    mock.assert();
}

#[test]
fn test_error_status_is_external_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(400).json_body(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        }));
    });

    let err = client(&server)
        .generate_content("bad", "gemini-2.0-flash", "Hello")
        .unwrap_err();
    match err {
        StackError::ExternalCall(message) => {
            assert!(message.contains("400"));
            assert!(message.contains("API key not valid."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_candidates_is_external_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({"candidates": []}));
    });

    let err = client(&server)
        .generate_content("key", "gemini-2.0-flash", "Hello")
        .unwrap_err();
    assert!(matches!(err, StackError::ExternalCall(_)));
}

#[test]
fn test_timeout_is_external_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(text_reply("late"));
    });

    let client = GeminiClient::new(&server.url("/v1beta"), Duration::from_millis(300)).unwrap();
    let err = client
        .generate_content("key", "gemini-2.0-flash", "Hello")
        .unwrap_err();
    assert!(matches!(err, StackError::ExternalCall(_)));
}

#[test]
fn test_configure_falls_through_model_list() {
    let server = MockServer::start();
    let rejected = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.0-flash-exp:generateContent");
        then.status(404).body("model not found");
    });
    let accepted = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(text_reply("Hello!"));
    });

    let store = Arc::new(MemoryCredentialStore::new());
    let ai = AiService::new(Arc::new(client(&server)), store);
    assert!(ai.configure("secret"));
    assert_eq!(ai.model().as_deref(), Some("gemini-2.5-flash"));
    assert_eq!(rejected.hits(), 1);
    assert_eq!(accepted.hits(), 1);
}

#[test]
fn test_advisor_end_to_end_with_http() {
    let server = MockServer::start();
    let probe = server.mock(|when, then| {
        when.method(POST).body_includes("\"Hello\"");
        then.status(200).json_body(text_reply("Hello!"));
    });
    let insight = server.mock(|when, then| {
        when.method(POST).body_includes("Provide detailed analysis of");
        then.status(200).json_body(text_reply("React renders the UI; Express serves the API."));
    });

    let ai = AiService::new(
        Arc::new(client(&server)),
        Arc::new(MemoryCredentialStore::new()),
    );
    let advisor = Advisor::builtin().unwrap().with_ai(ai);
    assert!(advisor.configure_ai("secret"));

    let result = advisor.compare_with_insights(&["react", "express"]);
    assert_eq!(
        result.ai_insights.as_deref(),
        Some("React renders the UI; Express serves the API.")
    );
    assert_eq!(probe.hits(), 1);
    assert_eq!(insight.hits(), 1);
}
