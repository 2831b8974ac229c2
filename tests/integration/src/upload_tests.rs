//! End-to-end tests for the document upload route
//!
//! Upload bounds are enforced before any downstream contact; accepted files
//! are relayed unchanged.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::*;
use crate::mock_agents::*;

const TEN_MIB: usize = 10 * 1024 * 1024;

#[tokio::test]
async fn accepted_upload_is_relayed_and_normalized() {
    let agent = MockAgent::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_success_reply()))
        .expect(1)
        .mount(&agent.server)
        .await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_file(
            "/chat/ocr",
            Some("t"),
            "exam.pdf",
            "application/pdf",
            b"%PDF-1.4 test".to_vec(),
        )
        .await;
    assert_status(&response, 200);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["extracted_text"],
        json!("--- Page 1 ---\nHemoglobin 14.1 g/dL")
    );
    assert_eq!(body["recommendations"][0], json!("Routine follow-up in 12 months"));

    // the relay was multipart with the original filename
    let requests = agent.server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let raw_body = String::from_utf8_lossy(&requests[0].body);
    assert!(raw_body.contains("exam.pdf"));
    assert!(raw_body.contains("%PDF-1.4 test"));
}

#[tokio::test]
async fn unsupported_content_type_is_400_and_never_relayed() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_file(
            "/chat/ocr",
            Some("t"),
            "notes.txt",
            "text/plain",
            b"plain text".to_vec(),
        )
        .await;
    assert_status(&response, 400);

    let body = TestGateway::json_body(response).await;
    assert!(body["response"].as_str().unwrap().contains("Unsupported file type"));
}

#[tokio::test]
async fn oversize_upload_is_400_with_the_exact_message() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    // 12 MiB PDF, over the 10 MiB cap
    let response = gateway
        .post_file(
            "/chat/ocr",
            Some("t"),
            "big.pdf",
            "application/pdf",
            vec![0u8; 12 * 1024 * 1024],
        )
        .await;
    assert_status(&response, 400);

    let body = TestGateway::json_body(response).await;
    assert_eq!(
        body["response"],
        json!("File too large. Maximum size is 10MB")
    );
}

#[tokio::test]
async fn upload_exactly_at_the_cap_is_accepted() {
    let agent = MockAgent::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_success_reply()))
        .mount(&agent.server)
        .await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_file(
            "/chat/ocr",
            Some("t"),
            "exact.png",
            "image/png",
            vec![0u8; TEN_MIB],
        )
        .await;
    assert_status(&response, 200);
}

#[tokio::test]
async fn missing_file_field_is_400() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let response = gateway
        .client
        .post(gateway.url("/chat/ocr"))
        .header("authorization", "Bearer t")
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_status(&response, 400);

    let body = TestGateway::json_body(response).await;
    assert!(body["response"].as_str().unwrap().contains("No file attached"));
}

#[tokio::test]
async fn upload_without_auth_is_401() {
    let agent = MockAgent::start().await;
    agent.expect_no_calls().await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_file(
            "/chat/ocr",
            None,
            "exam.pdf",
            "application/pdf",
            b"%PDF".to_vec(),
        )
        .await;
    assert_status(&response, 401);
}

#[tokio::test]
async fn downstream_document_failure_passes_through() {
    let agent = MockAgent::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Error processing file: corrupt PDF",
            "timestamp": "2025-09-07T00:00:00Z"
        })))
        .mount(&agent.server)
        .await;

    let gateway = TestGateway::spawn(TestTargets {
        documents: agent.url(),
        ..TestTargets::default()
    })
    .await;

    let response = gateway
        .post_file(
            "/chat/ocr",
            Some("t"),
            "broken.pdf",
            "application/pdf",
            b"not really a pdf".to_vec(),
        )
        .await;
    assert_status(&response, 200);

    let body = TestGateway::json_body(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Error processing file: corrupt PDF"));
}
