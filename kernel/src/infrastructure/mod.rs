/// Audit logging for review decisions.
pub mod audit;
/// Configuration management for the kernel.
pub mod config;
/// Logging setup.
pub mod telemetry;
