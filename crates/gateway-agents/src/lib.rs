//! # Gateway Agents
//!
//! Downstream agent dispatch for the chat gateway.
//!
//! This crate provides:
//! - The static dispatch table mapping capabilities to downstream targets
//! - The HTTP client that relays chat and document requests
//! - Normalization of each agent's native response into the shared envelope

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod dispatch;
mod normalize;

// Re-export main types
pub use client::AgentClient;
pub use dispatch::{DispatchTable, DownstreamTarget};
