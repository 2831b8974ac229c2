//! # Agent Chat Gateway
//!
//! Orchestration gateway that fronts specialized chat agents behind one
//! HTTP surface. Inbound requests are authenticated, validated, dispatched
//! to the capability's downstream agent, and the heterogeneous agent
//! responses are normalized into one envelope shape.
//!
//! ## Usage
//!
//! ```bash
//! # Start with default configuration
//! agent-chat-gateway
//!
//! # Start with a config file
//! GATEWAY_CONFIG=/etc/gateway.yaml agent-chat-gateway
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 GATEWAY_SMART_AGENT_URL=http://smart:8003 agent-chat-gateway
//! ```

use std::sync::Arc;

use gateway_agents::{AgentClient, DispatchTable};
use gateway_config::load_config;
use gateway_core::Capability;
use gateway_server::{AppState, HealthAggregator, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig};
use tracing::info;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("gateway failed: {e:#}");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run() -> anyhow::Result<()> {
    let config = load_config().await?;

    init_logging(
        &LoggingConfig::new()
            .with_level(&config.logging.level)
            .with_json(config.logging.json),
    )?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "starting agent chat gateway"
    );

    let table = DispatchTable::from_config(&config.agents)?;
    // the smart agent fronts both the database and retrieval paths, so it
    // is the one the composite health report probes
    let probe_url = table.target(Capability::SmartRoute).endpoint("health");

    let agents = Arc::new(AgentClient::new(table)?);
    let health = Arc::new(HealthAggregator::new(
        probe_url,
        config.health.probe_timeout,
    )?);

    let state = AppState::new(agents, health).with_payload_logging(config.logging.log_payloads);

    let server_config = ServerConfig::new()
        .with_host(&config.server.host)
        .with_port(config.server.port);

    Server::new(server_config, state).run().await?;

    Ok(())
}
