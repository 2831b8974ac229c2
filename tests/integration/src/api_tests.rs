//! End-to-end tests for the chat routes
//!
//! Covers authentication, shape validation, dispatch, error classification,
//! and envelope normalization.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::helpers::*;
use crate::mock_agents::*;

#[tokio::test]
async fn missing_auth_header_is_401_and_nothing_is_dispatched() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json("/chat/database", None, &json!({"message": "hi"}))
        .await;
    assert_status(&response, 401);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Missing Authorization header"));
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json_with_auth_header(
            "/chat/database",
            "Basic dXNlcjpwYXNz",
            &json!({"message": "hi"}),
        )
        .await;
    assert_status(&response, 401);
}

#[tokio::test]
async fn empty_message_is_400_and_nothing_is_dispatched() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        rag: agent.url(),
        smart: agent.url(),
        ..TestTargets::default()
    })
    .await;

    for path in ["/chat/database", "/chat/rag", "/chat/smart"] {
        let response = gateway
            .post_json(path, Some("t"), &json!({"message": "   "}))
            .await;
        assert_status(&response, 400);

        let body = TestGateway::json_body(response).await;
        assert_eq!(body["response"], json!("Message cannot be empty"));
    }
}

#[tokio::test]
async fn unknown_role_value_is_400() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json(
            "/chat/database",
            Some("t"),
            &json!({"message": "hi", "user_role": "superuser"}),
        )
        .await;
    assert_status(&response, 400);
}

#[tokio::test]
async fn database_round_trip_is_loss_free() {
    let agent = MockAgent::start().await;
    agent.mock_chat(database_success_reply()).await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json(
            "/chat/database",
            Some("t"),
            &json!({"message": "How many orders in August 2025?", "user_role": "admin"}),
        )
        .await;
    assert_status(&response, 200);

    // every recognized field comes back verbatim
    let body = TestGateway::json_body(response).await;
    assert_eq!(body, database_success_reply());
}

#[tokio::test]
async fn database_dispatch_forwards_the_role_hint() {
    let agent = MockAgent::start().await;
    agent.mock_chat(database_success_reply()).await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    gateway
        .post_json(
            "/chat/database",
            Some("t"),
            &json!({"message": "hi", "user_role": "admin"}),
        )
        .await;

    let requests = agent.server.received_requests().await.unwrap();
    let outbound: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(outbound["role"], json!("admin"));
}

#[tokio::test]
async fn omitted_role_defaults_to_employee() {
    let agent = MockAgent::start().await;
    agent.mock_chat(database_success_reply()).await;

    let gateway = TestGateway::spawn(TestTargets {
        database: agent.url(),
        ..TestTargets::default()
    })
    .await;

    gateway
        .post_json("/chat/database", Some("t"), &json!({"message": "hi"}))
        .await;

    let requests = agent.server.received_requests().await.unwrap();
    let outbound: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(outbound["role"], json!("employee"));
}

#[tokio::test]
async fn rag_dispatch_omits_the_role_and_returns_sources() {
    let agent = MockAgent::start().await;
    agent.mock_chat(rag_success_reply()).await;

    let gateway = TestGateway::spawn(TestTargets {
        rag: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json("/chat/rag", Some("t"), &json!({"message": "travel policy?"}))
        .await;
    assert_status(&response, 200);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["sources"][0]["title"], json!("Travel policy"));

    let requests = agent.server.received_requests().await.unwrap();
    let outbound: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(outbound.get("role").is_none());
}

#[tokio::test]
async fn smart_route_merges_both_metadata_blocks() {
    let agent = MockAgent::start().await;
    agent.mock_chat(smart_both_reply()).await;

    let gateway = TestGateway::spawn(TestTargets {
        smart: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json(
            "/chat/smart",
            Some("t"),
            &json!({"message": "orders vs policy?", "user_role": "manager"}),
        )
        .await;
    assert_status(&response, 200);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["agent_used"], json!("both"));
    assert_eq!(body["routing_info"]["confidence"], json!(0.87));
    assert_eq!(body["sql_info"]["queries_count"], json!(2));
    assert_eq!(body["sources"][0]["category"], json!("finance"));
}

#[tokio::test]
async fn unreachable_agent_is_503_naming_the_capability() {
    let gateway = TestGateway::spawn(TestTargets::default()).await;

    let response = gateway
        .post_json("/chat/database", Some("t"), &json!({"message": "hi"}))
        .await;
    assert_status(&response, 503);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("structured-query"));
}

#[tokio::test]
async fn slow_agent_is_408() {
    let agent = MockAgent::start().await;
    agent
        .mock_chat_delayed(rag_success_reply(), Duration::from_secs(2))
        .await;

    let gateway = TestGateway::spawn(TestTargets {
        rag: agent.url(),
        chat_timeout: Duration::from_millis(200),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json("/chat/rag", Some("t"), &json!({"message": "hi"}))
        .await;
    assert_status(&response, 408);

    let body = TestGateway::json_body(response).await;
    assert!(body["response"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn downstream_error_status_is_500() {
    let agent = MockAgent::start().await;
    agent.mock_chat_status(500).await;

    let gateway = TestGateway::spawn(TestTargets {
        smart: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json("/chat/smart", Some("t"), &json!({"message": "hi"}))
        .await;
    assert_status(&response, 500);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn downstream_reported_failure_passes_through_as_200() {
    let agent = MockAgent::start().await;
    agent
        .mock_chat(json!({"success": false, "response": "index not ready"}))
        .await;

    let gateway = TestGateway::spawn(TestTargets {
        rag: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_json("/chat/rag", Some("t"), &json!({"message": "hi"}))
        .await;
    // the downstream is the authority on its own success flag
    assert_status(&response, 200);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["response"], json!("index not ready"));
}

#[tokio::test]
async fn responses_echo_the_request_id_header() {
    let gateway = TestGateway::spawn(TestTargets::default()).await;

    let response = gateway
        .client
        .get(gateway.url("/chat/health"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        &"req-42".parse::<reqwest::header::HeaderValue>().unwrap()
    );
}
