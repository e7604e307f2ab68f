use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, AlignArgs, CompareArgs, ReplayArgs};
use crate::infrastructure::config::Settings;

/// Revise - diff snapshots and review tracked changes
#[derive(Parser, Debug)]
#[command(name = "revise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive (overrides the configured level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Diff two text snapshots into attributed change records
    Compare(CompareArgs),

    /// Align the paragraphs of two snapshots side by side
    Align(AlignArgs),

    /// Replay a JSON edit script through a tracking session
    Replay(ReplayArgs),
}

impl Command {
    /// Subcommand name, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Compare(_) => "compare",
            Self::Align(_) => "align",
            Self::Replay(_) => "replay",
        }
    }
}

impl Cli {
    /// Log level to use: the flag if given, else the configured one.
    #[must_use]
    pub fn effective_log_level<'a>(&'a self, settings: &'a Settings) -> &'a str {
        self.log_level
            .as_deref()
            .unwrap_or(&settings.telemetry.log_level)
    }

    /// Runs the selected subcommand, writing its report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file cannot be read or parsed, or if a
    /// replay step violates the session contract.
    pub fn run(&self, settings: &Settings, out: &mut dyn Write) -> Result<()> {
        match &self.command {
            Command::Compare(args) => commands::compare::run(args, &settings.comparison, out),
            Command::Align(args) => commands::align::run(args, &settings.comparison, out),
            Command::Replay(args) => commands::replay::run(args, &settings.tracking, out),
        }
    }
}
