//! Inbound chat request shape and validation.

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Coarse access-level hint forwarded to downstream agents.
///
/// The gateway validates the shape only; authorization semantics live in the
/// agents that receive the hint. Callers that omit the role get the
/// least-privileged tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Least-privileged tier, the default.
    #[default]
    Employee,
    /// Mid tier.
    Manager,
    /// Full access tier.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => f.write_str("employee"),
            Self::Manager => f.write_str("manager"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Body of the JSON chat routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The caller's message. Must be non-empty after trimming.
    pub message: String,
    /// Optional role hint; defaults to [`Role::Employee`] where required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

/// Rejects messages that are empty after trimming.
pub fn validate_message(message: &str) -> GatewayResult<()> {
    if message.trim().is_empty() {
        return Err(GatewayError::InvalidInput(
            "Message cannot be empty".to_string(),
        ));
    }
    Ok(())
}
