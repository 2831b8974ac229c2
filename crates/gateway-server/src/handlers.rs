//! HTTP request handlers for the gateway API.
//!
//! Every chat handler follows the same shape: credential check, shape
//! validation, one dispatch to the capability's agent, normalized envelope
//! back. Validation failures never reach a downstream agent.

use axum::extract::{Multipart, State};
use axum::Json;
use mime::Mime;
use serde::Serialize;
use tracing::{info, instrument, warn};

use gateway_core::{
    validate_message, Capability, ChatEnvelope, ChatRequest, DocumentEnvelope, DocumentUpload,
};
use gateway_telemetry::payload_preview;

use crate::error::ApiError;
use crate::extractors::{BearerToken, JsonBody, RequestId};
use crate::health::CompositeHealth;
use crate::state::AppState;

/// `POST /chat/database` for the structured-query capability.
#[instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn chat_database(
    State(state): State<AppState>,
    request_id: RequestId,
    token: BearerToken,
    body: JsonBody<ChatRequest>,
) -> Result<Json<ChatEnvelope>, ApiError> {
    dispatch_chat(state, Capability::StructuredQuery, token, body).await
}

/// `POST /chat/rag` for the retrieval capability.
#[instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn chat_rag(
    State(state): State<AppState>,
    request_id: RequestId,
    token: BearerToken,
    body: JsonBody<ChatRequest>,
) -> Result<Json<ChatEnvelope>, ApiError> {
    dispatch_chat(state, Capability::Retrieval, token, body).await
}

/// `POST /chat/smart` for the smart-route capability.
#[instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn chat_smart(
    State(state): State<AppState>,
    request_id: RequestId,
    token: BearerToken,
    body: JsonBody<ChatRequest>,
) -> Result<Json<ChatEnvelope>, ApiError> {
    dispatch_chat(state, Capability::SmartRoute, token, body).await
}

async fn dispatch_chat(
    state: AppState,
    capability: Capability,
    BearerToken(token): BearerToken,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatEnvelope>, ApiError> {
    state.verifier.verify(&token)?;
    validate_message(&request.message)?;

    let role = request.user_role.unwrap_or_default();
    info!(
        capability = %capability,
        role = %role,
        message = %payload_preview(&request.message, state.log_payloads),
        "chat request accepted"
    );

    let envelope = state
        .agents
        .chat(capability, &request.message, role)
        .await
        .map_err(|e| {
            warn!(capability = %capability, error = %e, "chat dispatch failed");
            ApiError::from(e)
        })?;

    Ok(Json(envelope))
}

/// `POST /chat/ocr` for the document-understanding capability.
///
/// Accepts one multipart `file` field, validates it, and relays the bytes
/// unchanged. Oversize and off-allowlist files are rejected before any
/// downstream contact.
#[instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn chat_ocr(
    State(state): State<AppState>,
    request_id: RequestId,
    BearerToken(token): BearerToken,
    mut multipart: Multipart,
) -> Result<Json<DocumentEnvelope>, ApiError> {
    state.verifier.verify(&token)?;

    let upload = read_file_field(&mut multipart).await?;
    upload.validate()?;

    info!(
        capability = %Capability::DocumentUnderstanding,
        filename = %upload.filename,
        content_type = %upload.content_type,
        size_bytes = upload.size_bytes(),
        "document upload accepted"
    );

    let envelope = state.agents.analyze_document(&upload).await.map_err(|e| {
        warn!(
            capability = %Capability::DocumentUnderstanding,
            error = %e,
            "document dispatch failed"
        );
        ApiError::from(e)
    })?;

    Ok(Json(envelope))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<DocumentUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(String::from);
        let content_type: Mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .parse()
            .map_err(|_| ApiError::bad_request("Invalid file content type"))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read uploaded file: {e}")))?;

        return Ok(DocumentUpload::new(filename.as_deref(), content_type, bytes));
    }

    Err(ApiError::bad_request(
        "No file attached. Send the document as the \"file\" form field",
    ))
}

/// `GET /chat/health`, the composite gateway plus downstream health.
///
/// Always HTTP 200; the `status` field carries the verdict.
pub async fn health(State(state): State<AppState>) -> Json<CompositeHealth> {
    Json(state.health.check().await)
}

/// Service descriptor returned from the root path.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Available endpoints.
    pub endpoints: Vec<&'static str>,
}

/// `GET /` service information.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "agent-chat-gateway",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "POST /chat/database",
            "POST /chat/rag",
            "POST /chat/smart",
            "POST /chat/ocr",
            "GET /chat/health",
        ],
    })
}
