use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use revise_engine::{ChangeRecord, Classification, CompareConfig, Comparer, Comparison, Granularity};
use tracing::info;

use super::{OutputFormat, preview, read_text, write_json};

const TEXT_WIDTH: usize = 40;

/// Arguments for `revise compare`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Baseline snapshot (plain text)
    pub baseline: PathBuf,

    /// Current snapshot (plain text)
    pub current: PathBuf,

    /// Token granularity (word, sentence, line)
    #[arg(short, long, default_value = "word")]
    pub granularity: Granularity,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Diffs the two snapshot files and writes the records and their summary.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be read or the report cannot be written.
pub fn run(args: &CompareArgs, config: &CompareConfig, out: &mut dyn Write) -> Result<()> {
    let baseline = read_text(&args.baseline)?;
    let current = read_text(&args.current)?;

    let comparison = Comparer::new()
        .with_config(config.clone())
        .with_granularity(args.granularity)
        .compare(&baseline, &current);
    info!(
        records = comparison.summary.total,
        moves = comparison.summary.moves,
        "Comparison finished"
    );

    match args.format {
        OutputFormat::Json => write_json(out, &comparison),
        OutputFormat::Text => render(&comparison, out),
    }
}

fn render(comparison: &Comparison, out: &mut dyn Write) -> Result<()> {
    if comparison.summary.is_empty() {
        writeln!(out, "No changes")?;
        return Ok(());
    }
    for record in &comparison.changes {
        render_record(record, out)?;
    }
    let summary = &comparison.summary;
    writeln!(
        out,
        "{} changes: {} insertions, {} deletions, {} replacements, {} moves ({} substantive, {} stylistic)",
        summary.total,
        summary.insertions,
        summary.deletions,
        summary.replacements,
        summary.moves,
        summary.substantive,
        summary.stylistic,
    )?;
    Ok(())
}

fn render_record(record: &ChangeRecord, out: &mut dyn Write) -> Result<()> {
    write!(
        out,
        "{:<11} {:>6}..{:<6}",
        format!("{:?}", record.kind),
        record.range.from,
        record.range.to
    )?;
    if let Some(text) = &record.deleted_text {
        write!(out, " -{:?}", preview(text, TEXT_WIDTH))?;
    }
    if let Some(text) = &record.inserted_text {
        write!(out, " +{:?}", preview(text, TEXT_WIDTH))?;
    }
    if let Some(class) = record.classification {
        write!(out, " [{}]", label(class))?;
    }
    writeln!(out, " ({:.2})", record.confidence)?;
    Ok(())
}

const fn label(class: Classification) -> &'static str {
    match (class.is_substantive, class.is_stylistic) {
        (true, true) => "substantive, stylistic",
        (true, false) => "substantive",
        (false, true) => "stylistic",
        (false, false) => "unchanged",
    }
}
