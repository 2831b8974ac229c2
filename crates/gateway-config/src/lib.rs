//! # Gateway Config
//!
//! Layered configuration for the agent chat gateway.
//!
//! Values are resolved in order: built-in defaults, then an optional YAML
//! file named by `GATEWAY_CONFIG`, then environment variable overrides.
//! The resolved configuration is validated once at startup and read-only
//! afterwards.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Environment variable naming the optional YAML config file.
pub const CONFIG_PATH_VAR: &str = "GATEWAY_CONFIG";

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Downstream agent targets, one per capability.
    pub agents: AgentTargets,
    /// Upload relay bounds.
    pub upload: UploadSettings,
    /// Health probe settings.
    pub health: HealthSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// One downstream agent's address and per-attempt timeout budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSettings {
    /// Base URL of the agent service.
    pub url: String,
    /// Per-attempt timeout for calls to this agent.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl TargetSettings {
    fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }
}

/// Downstream agent targets, one per capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTargets {
    /// Structured-query agent.
    pub database: TargetSettings,
    /// Knowledge-retrieval agent.
    pub rag: TargetSettings,
    /// Combining smart router agent.
    pub smart: TargetSettings,
    /// Document-understanding agent. Gets a longer budget: each request
    /// runs binary extraction plus a model inference pass.
    pub documents: TargetSettings,
}

impl Default for AgentTargets {
    fn default() -> Self {
        Self {
            database: TargetSettings::new("http://127.0.0.1:8001", Duration::from_secs(30)),
            rag: TargetSettings::new("http://127.0.0.1:8002", Duration::from_secs(30)),
            smart: TargetSettings::new("http://127.0.0.1:8003", Duration::from_secs(30)),
            documents: TargetSettings::new("http://127.0.0.1:8004", Duration::from_secs(120)),
        }
    }
}

/// Upload relay bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Maximum accepted file size in bytes.
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Health probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    /// Timeout for the downstream health probe, independent of the dispatch
    /// budgets so a hung agent cannot hang the health route.
    #[serde(with = "humantime_serde")]
    pub probe_timeout: Duration,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default log filter, overridable via `RUST_LOG`.
    pub level: String,
    /// Emit JSON-formatted log lines.
    pub json: bool,
    /// Log message payload previews. Off by default; when off, only the
    /// payload length is logged.
    pub log_payloads: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_payloads: false,
        }
    }
}

impl GatewayConfig {
    /// Applies `GATEWAY_*` environment overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("GATEWAY_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(url) = env::var("GATEWAY_DATABASE_AGENT_URL") {
            self.agents.database.url = url;
        }
        if let Ok(url) = env::var("GATEWAY_RAG_AGENT_URL") {
            self.agents.rag.url = url;
        }
        if let Ok(url) = env::var("GATEWAY_SMART_AGENT_URL") {
            self.agents.smart.url = url;
        }
        if let Ok(url) = env::var("GATEWAY_DOCUMENTS_AGENT_URL") {
            self.agents.documents.url = url;
        }
        if let Ok(level) = env::var("GATEWAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(value) = env::var("GATEWAY_LOG_PAYLOADS") {
            self.logging.log_payloads = matches!(value.as_str(), "1" | "true" | "yes");
        }
    }

    /// Validates the resolved configuration. Failures here are fatal at
    /// startup; nothing is re-validated per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, target) in [
            ("database", &self.agents.database),
            ("rag", &self.agents.rag),
            ("smart", &self.agents.smart),
            ("documents", &self.agents.documents),
        ] {
            let url = Url::parse(&target.url).map_err(|e| {
                ConfigError::Invalid(format!("{name} agent url {:?}: {e}", target.url))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "{name} agent url {:?}: scheme must be http or https",
                    target.url
                )));
            }
            if target.timeout.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "{name} agent timeout must be greater than zero"
                )));
            }
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "upload.max_bytes must be greater than zero".to_string(),
            ));
        }
        if self.health.probe_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "health.probe_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads configuration: defaults, then the `GATEWAY_CONFIG` file when set,
/// then environment overrides, then validation.
pub async fn load_config() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => from_file(&path).await?,
        Err(_) => GatewayConfig::default(),
    };
    config.apply_env_overrides();
    config.validate()?;
    debug!(
        database = %config.agents.database.url,
        rag = %config.agents.rag.url,
        smart = %config.agents.smart.url,
        documents = %config.agents.documents.url,
        "configuration resolved"
    );
    Ok(config)
}

/// Reads and parses a YAML config file.
pub async fn from_file(path: &str) -> Result<GatewayConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
    serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Configuration load/validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The config file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
    /// A resolved value is out of bounds or malformed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
