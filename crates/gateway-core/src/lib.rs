//! # Gateway Core
//!
//! Core types for the agent chat gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The response envelope shared by every chat route
//! - Agent metadata shapes (structured query, retrieval, smart routing)
//! - Request validation types and the document upload contract
//! - The gateway error taxonomy

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capability;
pub mod envelope;
pub mod error;
pub mod request;
pub mod upload;

// Re-export commonly used types
pub use capability::Capability;
pub use envelope::{
    now_rfc3339, AgentMetadata, AgentUsed, ChatEnvelope, DocumentEnvelope, ExecutedQuery,
    RoutingInfo, SourceRef, SqlInfo,
};
pub use error::{GatewayError, GatewayResult};
pub use request::{validate_message, ChatRequest, Role};
pub use upload::{DocumentUpload, MAX_DOCUMENT_BYTES};
