//! Subcommands of the `revise` binary.
//!
//! Each command reads its inputs from files, runs the engine and writes a
//! report to the writer it is given, so tests can capture output in memory.

/// `revise align`.
pub mod align;
/// `revise compare`.
pub mod compare;
/// `revise replay`.
pub mod replay;

pub use align::AlignArgs;
pub use compare::CompareArgs;
pub use replay::ReplayArgs;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to write JSON report")?;
    writeln!(out)?;
    Ok(())
}

/// Shortens `text` to at most `width` chars on one line.
fn preview(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut short: String = flat.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
