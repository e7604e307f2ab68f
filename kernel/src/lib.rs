//! Revise Kernel
//!
//! Command-line host for the revise engine. It loads layered configuration,
//! initialises logging and drives the engine from files: snapshot
//! comparison, paragraph alignment and replay of recorded edit scripts
//! through a live tracking session.

/// Command-line parser and dispatch.
pub mod cli;
/// Subcommand implementations.
pub mod commands;
/// Infrastructure components (config, telemetry, audit).
pub mod infrastructure;
/// Replayable edit scripts.
pub mod script;
