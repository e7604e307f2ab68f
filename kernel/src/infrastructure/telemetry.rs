//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Builder for the process-wide logging subscriber.
///
/// Logs go to stderr so command output on stdout stays machine readable.
#[derive(Debug, Clone)]
pub struct TelemetryBuilder {
    service_name: String,
    service_version: String,
    log_level: String,
    json: bool,
}

impl TelemetryBuilder {
    /// Creates a builder logging at `warn` in human-readable form.
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            log_level: "warn".to_string(),
            json: false,
        }
    }

    /// Sets the filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches to JSON lines with span close events.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Returns the filter directive that `init` falls back to.
    #[must_use]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Installs the subscriber as the global default.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter directive is invalid or a global
    /// subscriber is already installed.
    pub fn init(self) -> Result<()> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("Invalid log level '{}'", self.log_level))?,
        };

        let fmt_layer = if self.json {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE)
                .boxed()
        } else {
            fmt::layer().with_writer(std::io::stderr).with_target(false).boxed()
        };

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to init subscriber")?;

        tracing::debug!(
            service = %self.service_name,
            version = %self.service_version,
            "Telemetry initialized"
        );
        Ok(())
    }
}
