//! # Gateway Telemetry
//!
//! Logging setup and payload redaction for the agent chat gateway.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod redact;

pub use logging::{init_logging, LoggingConfig, TelemetryError};
pub use redact::payload_preview;
