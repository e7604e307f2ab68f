use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use revise_engine::TrackingConfig;

use super::{OutputFormat, preview, read_text, write_json};
use crate::infrastructure::audit::{AuditEvent, log_audit};
use crate::script::{Finish, ReplayOutcome, ReplayScript, replay};

const TEXT_WIDTH: usize = 40;

/// Arguments for `revise replay`.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON edit script
    pub script: PathBuf,

    /// Review applied after the last step
    #[arg(long, value_enum, default_value_t = Finish::None)]
    pub finish: Finish,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Replays the script and writes the final document, pending changes and patches.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or a step fails.
pub fn run(args: &ReplayArgs, config: &TrackingConfig, out: &mut dyn Write) -> Result<()> {
    let raw = read_text(&args.script)?;
    let script: ReplayScript = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid replay script {}", args.script.display()))?;

    log_audit(&AuditEvent::ReplayStarted {
        source: args.script.display().to_string(),
        steps: script.steps.len(),
    });
    let outcome = replay(&script, config, args.finish)?;

    match args.format {
        OutputFormat::Json => write_json(out, &outcome),
        OutputFormat::Text => render(&outcome, out),
    }
}

fn render(outcome: &ReplayOutcome, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Document (version {}):", outcome.version)?;
    writeln!(out, "{}", outcome.document)?;
    writeln!(out)?;

    writeln!(out, "Pending changes: {}", outcome.pending.len())?;
    for (i, record) in outcome.pending.iter().enumerate() {
        write!(
            out,
            "  [{i}] {:?} {}..{} by {}",
            record.kind, record.range.from, record.range.to, record.author.display_name
        )?;
        if let Some(text) = &record.deleted_text {
            write!(out, " -{:?}", preview(text, TEXT_WIDTH))?;
        }
        if let Some(text) = &record.inserted_text {
            write!(out, " +{:?}", preview(text, TEXT_WIDTH))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Patches: {}", outcome.patches.len())?;
    for (i, patch) in outcome.patches.iter().enumerate() {
        for edit in patch.edits() {
            writeln!(
                out,
                "  #{i} {}..{} -> {:?}",
                edit.from,
                edit.to,
                preview(&edit.text, TEXT_WIDTH)
            )?;
        }
    }
    Ok(())
}
