//! Normalization of native agent responses into the shared envelope.
//!
//! Each capability has its own raw reply shape. `success` and `response`
//! pass through unchanged (the downstream is the authority on whether its
//! own operation succeeded); recognized metadata fields are copied verbatim,
//! and absent fields stay absent rather than erroring.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use gateway_core::{
    now_rfc3339, AgentMetadata, AgentUsed, Capability, ChatEnvelope, DocumentEnvelope,
    GatewayError, GatewayResult, RoutingInfo, SourceRef, SqlInfo,
};

pub(crate) fn chat_envelope(capability: Capability, body: Value) -> GatewayResult<ChatEnvelope> {
    match capability {
        Capability::StructuredQuery => {
            let reply: DatabaseReply = parse(capability, body)?;
            Ok(ChatEnvelope {
                success: reply.success,
                response: reply.response,
                timestamp: reply.timestamp.unwrap_or_else(now_rfc3339),
                metadata: reply
                    .sql_info
                    .map(|sql_info| AgentMetadata::StructuredQuery { sql_info }),
            })
        }
        Capability::Retrieval => {
            let reply: RetrievalReply = parse(capability, body)?;
            Ok(ChatEnvelope {
                success: reply.success,
                response: reply.response,
                timestamp: reply.timestamp.unwrap_or_else(now_rfc3339),
                metadata: reply
                    .sources
                    .map(|sources| AgentMetadata::Retrieval { sources }),
            })
        }
        Capability::SmartRoute => {
            let reply: SmartReply = parse(capability, body)?;
            Ok(ChatEnvelope {
                success: reply.success,
                response: reply.response,
                timestamp: reply.timestamp.unwrap_or_else(now_rfc3339),
                metadata: reply.agent_used.map(|agent_used| AgentMetadata::SmartRoute {
                    agent_used,
                    routing_info: reply.routing_info,
                    sql_info: reply.sql_info,
                    sources: reply.sources,
                }),
            })
        }
        Capability::DocumentUnderstanding => Err(GatewayError::DownstreamError {
            capability,
            message: "agent returned a malformed response".to_string(),
        }),
    }
}

pub(crate) fn document_envelope(body: Value) -> GatewayResult<DocumentEnvelope> {
    let reply: DocumentReply = parse(Capability::DocumentUnderstanding, body)?;
    Ok(DocumentEnvelope {
        success: reply.success,
        extracted_text: reply.extracted_text,
        analysis: reply.analysis,
        recommendations: reply.recommendations,
        alerts: reply.alerts,
        error: reply.error,
        timestamp: reply.timestamp.unwrap_or_else(now_rfc3339),
    })
}

fn parse<T: DeserializeOwned>(capability: Capability, body: Value) -> GatewayResult<T> {
    serde_json::from_value(body).map_err(|e| {
        warn!(capability = %capability, error = %e, "failed to decode downstream response");
        GatewayError::DownstreamError {
            capability,
            message: "agent returned a malformed response".to_string(),
        }
    })
}

#[derive(Debug, Deserialize)]
struct DatabaseReply {
    success: bool,
    #[serde(default)]
    response: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    sql_info: Option<SqlInfo>,
}

#[derive(Debug, Deserialize)]
struct RetrievalReply {
    success: bool,
    #[serde(default)]
    response: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    sources: Option<Vec<SourceRef>>,
}

#[derive(Debug, Deserialize)]
struct SmartReply {
    success: bool,
    #[serde(default)]
    response: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    agent_used: Option<AgentUsed>,
    #[serde(default)]
    routing_info: Option<RoutingInfo>,
    #[serde(default)]
    sql_info: Option<SqlInfo>,
    #[serde(default)]
    sources: Option<Vec<SourceRef>>,
}

#[derive(Debug, Deserialize)]
struct DocumentReply {
    success: bool,
    #[serde(default)]
    extracted_text: String,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    alerts: Vec<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}
