//! # Gateway Server
//!
//! HTTP server for the agent chat gateway.
//!
//! This crate provides:
//! - Axum routes for the chat, upload, and health endpoints
//! - Bearer credential extraction with a pluggable verification seam
//! - Request handlers that validate, dispatch, and normalize
//! - The composite health aggregator
//! - Graceful shutdown handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use auth::{AuthError, Principal, SchemeOnlyVerifier, TokenVerifier};
pub use error::ApiError;
pub use health::{CompositeHealth, HealthAggregator, ServiceHealth};
pub use routes::create_router;
pub use server::{Server, ServerConfig, ServerError};
pub use state::AppState;
