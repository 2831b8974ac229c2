//! Composite health reporting.
//!
//! The aggregator combines the gateway's own liveness with one downstream
//! probe. The probe runs under its own short timeout so a hung agent cannot
//! hang the health route, and any probe failure collapses to "down" for the
//! caller; the cause is only logged.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gateway_core::{now_rfc3339, GatewayError, GatewayResult};

/// Overall gateway health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    /// Gateway and downstream both answering.
    Healthy,
    /// Downstream unreachable or reporting trouble.
    Unhealthy,
}

/// Per-service statuses inside the composite report.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    /// The gateway itself; "up" whenever it can answer at all.
    pub gateway: &'static str,
    /// Observed downstream status, or "down" when the probe failed.
    pub downstream: String,
}

/// The composite health response. Always served with HTTP 200; the `status`
/// field carries the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeHealth {
    /// Overall verdict.
    pub status: ServiceHealth,
    /// Per-service breakdown.
    pub services: ServiceReport,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct ProbeReply {
    status: String,
}

/// Probes the downstream health endpoint and composes the report.
pub struct HealthAggregator {
    http: Client,
    probe_url: String,
    probe_timeout: Duration,
}

impl HealthAggregator {
    /// Creates an aggregator probing the given health URL.
    pub fn new(probe_url: String, probe_timeout: Duration) -> GatewayResult<Self> {
        let http = Client::builder().build().map_err(|e| {
            GatewayError::Configuration(format!("failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            probe_url,
            probe_timeout,
        })
    }

    /// Runs the probe and composes the report.
    pub async fn check(&self) -> CompositeHealth {
        let (status, downstream) = match self.probe().await {
            Ok(observed) => {
                let status = if observed == "healthy" {
                    ServiceHealth::Healthy
                } else {
                    ServiceHealth::Unhealthy
                };
                (status, observed)
            }
            Err(cause) => {
                debug!(error = %cause, "downstream health probe failed");
                (ServiceHealth::Unhealthy, "down".to_string())
            }
        };

        CompositeHealth {
            status,
            services: ServiceReport {
                gateway: "up",
                downstream,
            },
            timestamp: now_rfc3339(),
        }
    }

    async fn probe(&self) -> Result<String, String> {
        let response = self
            .http
            .get(&self.probe_url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("probe returned status {}", status.as_u16()));
        }

        let reply: ProbeReply = response.json().await.map_err(|e| e.to_string())?;
        Ok(reply.status)
    }
}
