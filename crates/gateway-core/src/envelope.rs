//! The uniform response envelope and per-agent metadata shapes.
//!
//! Every chat route answers with [`ChatEnvelope`]; the document route answers
//! with [`DocumentEnvelope`]. Metadata is a closed, tagged union so the
//! normalizer is exhaustively checked instead of passing open JSON through.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current UTC time as an RFC 3339 string, the envelope timestamp format.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The response shape shared by every chat route.
///
/// `success` and `response` come from the downstream agent unchanged; the
/// gateway only fills them in itself for failures it detects locally.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEnvelope {
    /// Whether the downstream operation succeeded.
    pub success: bool,
    /// Agent answer, or a human-readable failure description.
    pub response: String,
    /// RFC 3339 timestamp, passed through from the agent when present.
    pub timestamp: String,
    /// Agent-specific metadata, flattened into the envelope body.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AgentMetadata>,
}

impl ChatEnvelope {
    /// Envelope for a failure detected by the gateway itself.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            response: message.into(),
            timestamp: now_rfc3339(),
            metadata: None,
        }
    }
}

/// Agent-specific metadata, keyed by which capability served the request.
///
/// Serialized untagged: each variant contributes its own top-level fields to
/// the envelope, matching the downstream agents' native field names.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AgentMetadata {
    /// Execution stats from the structured-query agent.
    StructuredQuery {
        /// Queries the agent ran on the caller's behalf.
        sql_info: SqlInfo,
    },
    /// Source attributions from the retrieval agent.
    Retrieval {
        /// Documents that grounded the answer.
        sources: Vec<SourceRef>,
    },
    /// Routing rationale from the smart agent, plus whichever of the other
    /// two metadata blocks it chose to include.
    SmartRoute {
        /// Which downstream path the smart agent took.
        agent_used: AgentUsed,
        /// The routing decision and its rationale.
        #[serde(skip_serializing_if = "Option::is_none")]
        routing_info: Option<RoutingInfo>,
        /// Present when the database path ran.
        #[serde(skip_serializing_if = "Option::is_none")]
        sql_info: Option<SqlInfo>,
        /// Present when the retrieval path ran.
        #[serde(skip_serializing_if = "Option::is_none")]
        sources: Option<Vec<SourceRef>>,
    },
}

/// Which path the smart agent consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentUsed {
    /// Structured-query agent only.
    Database,
    /// Retrieval agent only.
    Rag,
    /// Both agents, answers combined downstream.
    Both,
}

/// SQL execution summary reported by the structured-query agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlInfo {
    /// Individual queries, in execution order.
    #[serde(default)]
    pub queries_executed: Vec<ExecutedQuery>,
    /// Total execution time in milliseconds.
    #[serde(default)]
    pub total_execution_time: u64,
    /// Number of queries executed.
    #[serde(default)]
    pub queries_count: u32,
}

/// One query the structured-query agent ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedQuery {
    /// Query kind as reported by the agent.
    #[serde(rename = "type")]
    pub query_type: String,
    /// Human-readable description of what the query did.
    #[serde(default)]
    pub description: String,
    /// The SQL text, when the agent chose to expose it.
    #[serde(default)]
    pub sql_query: Option<String>,
}

/// A document that grounded a retrieval answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Corpus category the document belongs to.
    #[serde(default)]
    pub category: String,
    /// Storage path or locator, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Similarity score in the agent's own scale.
    #[serde(default)]
    pub relevance_score: f64,
}

/// The smart agent's routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingInfo {
    /// Agent the router selected.
    #[serde(default)]
    pub agent: String,
    /// Router confidence in the selection, 0.0 to 1.0.
    #[serde(default)]
    pub confidence: f64,
    /// Short rationale for the selection.
    #[serde(default)]
    pub reasoning: String,
}

/// Response shape of the document-understanding route.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentEnvelope {
    /// Whether extraction and analysis succeeded downstream.
    pub success: bool,
    /// Raw OCR text.
    pub extracted_text: String,
    /// The agent's analysis of the extracted content.
    pub analysis: String,
    /// Follow-up recommendations.
    pub recommendations: Vec<String>,
    /// Findings that need attention.
    pub alerts: Vec<String>,
    /// Failure description when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}
