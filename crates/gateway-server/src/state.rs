//! Shared application state.

use std::sync::Arc;

use gateway_agents::AgentClient;

use crate::auth::{SchemeOnlyVerifier, TokenVerifier};
use crate::health::HealthAggregator;

/// State shared by all request handlers.
///
/// Everything here is read-only after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Downstream agent client.
    pub agents: Arc<AgentClient>,
    /// Composite health aggregator.
    pub health: Arc<HealthAggregator>,
    /// Bearer token verifier.
    pub verifier: Arc<dyn TokenVerifier>,
    /// Whether message payload previews may appear in logs.
    pub log_payloads: bool,
}

impl AppState {
    /// Creates state with the placeholder scheme-only verifier and payload
    /// logging off.
    pub fn new(agents: Arc<AgentClient>, health: Arc<HealthAggregator>) -> Self {
        Self {
            agents,
            health,
            verifier: Arc::new(SchemeOnlyVerifier),
            log_payloads: false,
        }
    }

    /// Substitutes the token verifier.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Enables or disables payload previews in logs.
    #[must_use]
    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }
}
