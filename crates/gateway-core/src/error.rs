//! Gateway error taxonomy.
//!
//! Every failure surfaced to a caller is one of these kinds. Validation
//! failures are produced before any downstream call; downstream failures are
//! classified at the dispatch boundary. Messages are short and safe to return
//! to clients; diagnostic detail belongs in logs.

use crate::capability::Capability;

/// Result alias using [`GatewayError`].
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Classified gateway failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request body failed shape validation (missing or empty fields).
    #[error("{0}")]
    InvalidInput(String),

    /// The bearer credential is missing or malformed.
    #[error("{0}")]
    Unauthenticated(String),

    /// The uploaded file's content type is outside the allowlist.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// The uploaded file exceeds the relay size cap.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The downstream agent could not be reached at all.
    #[error("{capability} agent is unavailable")]
    DownstreamUnavailable {
        /// Capability whose target refused the connection.
        capability: Capability,
    },

    /// The downstream call exceeded the capability's timeout budget.
    #[error("{capability} agent timed out")]
    DownstreamTimeout {
        /// Capability whose budget was exhausted.
        capability: Capability,
    },

    /// Any other downstream failure, including malformed responses.
    #[error("{capability} agent request failed: {message}")]
    DownstreamError {
        /// Capability that was dispatched.
        capability: Capability,
        /// Short, non-sensitive description of the failure.
        message: String,
    },

    /// Invalid static configuration. Fatal at startup, never per-request.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// True for the kinds detected locally, before any downstream call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::Unauthenticated(_)
                | Self::UnsupportedMediaType(_)
                | Self::PayloadTooLarge(_)
        )
    }
}
