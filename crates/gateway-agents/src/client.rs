//! HTTP client for downstream agent calls.
//!
//! One outbound call per inbound request, bounded by the target's timeout
//! budget. Failures are classified at this boundary into the gateway error
//! taxonomy; raw transport detail goes to logs, never to callers.

use std::time::Instant;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use gateway_core::{
    Capability, ChatEnvelope, DocumentEnvelope, DocumentUpload, GatewayError, GatewayResult, Role,
};

use crate::dispatch::DispatchTable;
use crate::normalize;

/// Client for the downstream agents named in the dispatch table.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct AgentClient {
    http: Client,
    table: DispatchTable,
}

#[derive(Debug, Serialize)]
struct DispatchBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

impl AgentClient {
    /// Creates the client over a resolved dispatch table.
    pub fn new(table: DispatchTable) -> GatewayResult<Self> {
        let http = Client::builder()
            .pool_max_idle_per_host(100)
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { http, table })
    }

    /// The dispatch table this client routes with.
    #[must_use]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Relays a chat message to the capability's agent and normalizes the
    /// reply. The role hint is only forwarded to capabilities that take one.
    pub async fn chat(
        &self,
        capability: Capability,
        message: &str,
        role: Role,
    ) -> GatewayResult<ChatEnvelope> {
        let target = self.table.target(capability);
        let url = target.endpoint("chat");
        let body = DispatchBody {
            message,
            role: capability.forwards_role().then_some(role),
        };

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .timeout(target.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(capability, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                capability = %capability,
                status = status.as_u16(),
                "downstream agent returned an error status"
            );
            return Err(GatewayError::DownstreamError {
                capability,
                message: format!("agent returned status {}", status.as_u16()),
            });
        }

        let value: Value = response.json().await.map_err(|e| {
            warn!(capability = %capability, error = %e, "failed to read downstream response body");
            GatewayError::DownstreamError {
                capability,
                message: "agent returned a malformed response".to_string(),
            }
        })?;

        let envelope = normalize::chat_envelope(capability, value)?;
        debug!(
            capability = %capability,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = envelope.success,
            "chat dispatch complete"
        );
        Ok(envelope)
    }

    /// Relays an already-validated upload to the document-understanding
    /// agent as a multipart request.
    pub async fn analyze_document(
        &self,
        upload: &DocumentUpload,
    ) -> GatewayResult<DocumentEnvelope> {
        let capability = Capability::DocumentUnderstanding;
        let target = self.table.target(capability);
        let url = target.endpoint("chat");

        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.filename.clone())
            .mime_str(upload.content_type.essence_str())
            .map_err(|e| {
                warn!(error = %e, "failed to encode upload part");
                GatewayError::DownstreamError {
                    capability,
                    message: "failed to encode upload".to_string(),
                }
            })?;
        let form = Form::new().part("file", part);

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .timeout(target.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_transport_error(capability, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                capability = %capability,
                status = status.as_u16(),
                "downstream agent returned an error status"
            );
            return Err(GatewayError::DownstreamError {
                capability,
                message: format!("agent returned status {}", status.as_u16()),
            });
        }

        let value: Value = response.json().await.map_err(|e| {
            warn!(capability = %capability, error = %e, "failed to read downstream response body");
            GatewayError::DownstreamError {
                capability,
                message: "agent returned a malformed response".to_string(),
            }
        })?;

        let envelope = normalize::document_envelope(value)?;
        debug!(
            capability = %capability,
            elapsed_ms = started.elapsed().as_millis() as u64,
            file_size = upload.size_bytes(),
            success = envelope.success,
            "document dispatch complete"
        );
        Ok(envelope)
    }
}

fn classify_transport_error(capability: Capability, error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        warn!(capability = %capability, "downstream call exceeded its timeout budget");
        GatewayError::DownstreamTimeout { capability }
    } else if error.is_connect() {
        warn!(capability = %capability, error = %error, "downstream agent unreachable");
        GatewayError::DownstreamUnavailable { capability }
    } else {
        warn!(capability = %capability, error = %error, "downstream call failed");
        GatewayError::DownstreamError {
            capability,
            message: "agent request failed".to_string(),
        }
    }
}
