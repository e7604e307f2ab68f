//! Entry point of the `revise` binary.

use std::io;

use anyhow::Context;
use clap::Parser;
use revise_kernel::cli::Cli;
use revise_kernel::infrastructure::{config::Settings, telemetry::TelemetryBuilder};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    TelemetryBuilder::new(
        settings.telemetry.service_name.clone(),
        env!("CARGO_PKG_VERSION"),
    )
    .with_log_level(cli.effective_log_level(&settings))
    .with_json(cli.json_logs || settings.telemetry.json)
    .init()?;

    info!(command = cli.command.name(), "Revise starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.run(&settings, &mut out)
}
