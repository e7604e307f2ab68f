//! Configuration management for the revise kernel.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `REVISE__`-prefixed environment variables (`__` separates sections, e.g.
//! `REVISE__TRACKING__COALESCE_WINDOW_MS=1500`).
//!
//! # Example
//!
//! ```
//! use revise_kernel::infrastructure::config::Settings;
//!
//! let settings = Settings::load(None).expect("Failed to load configuration");
//! assert_eq!(settings.tracking.block_limit, 10);
//! ```

pub mod telemetry;

pub use telemetry::TelemetrySettings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use revise_engine::{CompareConfig, TrackingConfig};
use serde::Deserialize;

/// Top-level configuration for the revise kernel.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Logging settings.
    pub telemetry: TelemetrySettings,
    /// Static comparison thresholds.
    #[serde(default)]
    pub comparison: CompareConfig,
    /// Live tracking thresholds.
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl Settings {
    /// Builds the settings from defaults, `file` (if any) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Start with default values
            .set_default("telemetry.service_name", "revise")?
            .set_default("telemetry.log_level", "warn")?
            .set_default("telemetry.json", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("REVISE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
