//! Logging configuration for the revise kernel.

use serde::Deserialize;

/// Telemetry configuration settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Service name attached to log output.
    pub service_name: String,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset (default: "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs (default: false)
    #[serde(default)]
    pub json: bool,
}

pub(super) fn default_log_level() -> String {
    "warn".to_string()
}
