//! Integration tests for [`agent_client::HttpAgentClient`] against a mockito server.
//!
//! Covers request bodies, the 201/409 success rule for create calls, and chat reply decoding.

use std::time::Duration;

use agent_client::{AgentClient, AgentError, HttpAgentClient, UserProfile};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> HttpAgentClient {
    HttpAgentClient::new(server.url(), Duration::from_secs(5)).unwrap()
}

/// **Test: Trailing slashes on the base URL are trimmed.**
#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = HttpAgentClient::new("http://agent:8000/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.base_url(), "http://agent:8000");
}

/// **Test: create_user_context posts user_id and profile; 201 is success.**
#[tokio::test]
async fn test_create_user_context_created() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/user_context")
        .match_body(Matcher::Json(json!({
            "user_id": "telegram:42",
            "user_profile": { "first_name": "Ada" }
        })))
        .with_status(201)
        .create_async()
        .await;

    let profile = UserProfile {
        first_name: "Ada".to_string(),
    };
    client_for(&server)
        .create_user_context("telegram:42", Some(&profile))
        .await
        .unwrap();

    mock.assert_async().await;
}

/// **Test: 409 Conflict means the user context already exists and is treated as success.**
#[tokio::test]
async fn test_create_user_context_conflict_is_ok() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/user_context")
        .with_status(409)
        .create_async()
        .await;

    let result = client_for(&server)
        .create_user_context("telegram:42", None)
        .await;

    assert!(result.is_ok());
    mock.assert_async().await;
}

/// **Test: Any other status fails with the status and body.**
#[tokio::test]
async fn test_create_session_unexpected_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/session")
        .match_body(Matcher::Json(json!({
            "user_id": "telegram:42",
            "session_id": "telegram_session:42"
        })))
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = client_for(&server)
        .create_session("telegram:42", "telegram_session:42")
        .await
        .unwrap_err();

    match err {
        AgentError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    mock.assert_async().await;
}

/// **Test: generate_response returns the `response` field of a 200 reply.**
#[tokio::test]
async fn test_generate_response_ok() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "session_id": "telegram_session:42",
            "message": "hello"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "**hi** there"}"#)
        .create_async()
        .await;

    let reply = client_for(&server)
        .generate_response("telegram_session:42", "hello")
        .await
        .unwrap();

    assert_eq!(reply, "**hi** there");
    mock.assert_async().await;
}

/// **Test: A 200 reply without `response` is an error, not an empty reply.**
#[tokio::test]
async fn test_generate_response_missing_field() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"other": 1}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate_response("telegram_session:42", "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MissingResponse));
}

/// **Test: 201 is not a valid chat reply; chat requires 200.**
#[tokio::test]
async fn test_generate_response_requires_ok() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(201)
        .with_body(r#"{"response": "hi"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate_response("telegram_session:42", "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Status { .. }));
}

/// **Test: A non-JSON body fails decoding.**
#[tokio::test]
async fn test_generate_response_invalid_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate_response("telegram_session:42", "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Decode(_)));
}

/// **Test: An unreachable service surfaces as a request error.**
#[tokio::test]
async fn test_unreachable_service() {
    let client = HttpAgentClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    let err = client.create_session("u", "s").await.unwrap_err();

    assert!(matches!(err, AgentError::Request { .. }));
}
