//! The static dispatch table.
//!
//! Built once at startup from validated configuration, immutable afterwards.
//! Lookups are read-only and safe for concurrent use without locking.

use std::time::Duration;

use url::Url;

use gateway_config::{AgentTargets, TargetSettings};
use gateway_core::{Capability, GatewayError, GatewayResult};

/// One downstream agent's resolved address and timeout budget.
#[derive(Debug, Clone)]
pub struct DownstreamTarget {
    /// Capability this target serves.
    pub capability: Capability,
    /// Base URL of the agent service.
    pub base_url: Url,
    /// Per-attempt timeout budget.
    pub timeout: Duration,
}

impl DownstreamTarget {
    fn from_settings(capability: Capability, settings: &TargetSettings) -> GatewayResult<Self> {
        let base_url = Url::parse(&settings.url).map_err(|e| {
            GatewayError::Configuration(format!(
                "{capability} agent url {:?}: {e}",
                settings.url
            ))
        })?;
        if settings.timeout.is_zero() {
            return Err(GatewayError::Configuration(format!(
                "{capability} agent timeout must be greater than zero"
            )));
        }
        Ok(Self {
            capability,
            base_url,
            timeout: settings.timeout,
        })
    }

    /// Full URL for an endpoint path under this target's base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Capability → downstream target mapping.
///
/// Total by construction: a capability without a valid target is a fatal
/// configuration error at startup, never a per-request condition.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    database: DownstreamTarget,
    rag: DownstreamTarget,
    smart: DownstreamTarget,
    documents: DownstreamTarget,
}

impl DispatchTable {
    /// Builds the table from configuration, resolving every target URL.
    pub fn from_config(agents: &AgentTargets) -> GatewayResult<Self> {
        Ok(Self {
            database: DownstreamTarget::from_settings(
                Capability::StructuredQuery,
                &agents.database,
            )?,
            rag: DownstreamTarget::from_settings(Capability::Retrieval, &agents.rag)?,
            smart: DownstreamTarget::from_settings(Capability::SmartRoute, &agents.smart)?,
            documents: DownstreamTarget::from_settings(
                Capability::DocumentUnderstanding,
                &agents.documents,
            )?,
        })
    }

    /// Looks up the target for a capability.
    #[must_use]
    pub fn target(&self, capability: Capability) -> &DownstreamTarget {
        match capability {
            Capability::StructuredQuery => &self.database,
            Capability::Retrieval => &self.rag,
            Capability::SmartRoute => &self.smart,
            Capability::DocumentUnderstanding => &self.documents,
        }
    }
}
