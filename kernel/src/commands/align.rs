use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use revise_engine::{CompareConfig, Comparer, ParagraphAlignment};
use tracing::info;

use super::{OutputFormat, preview, read_text, write_json};

const COLUMN_WIDTH: usize = 36;

/// Arguments for `revise align`.
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Baseline snapshot (plain text)
    pub baseline: PathBuf,

    /// Current snapshot (plain text)
    pub current: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Aligns the paragraphs of the two snapshot files.
///
/// The text report prints one row per pair: `=` identical, `~` similar,
/// `-` only in the baseline, `+` only in the current snapshot.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be read or the report cannot be written.
pub fn run(args: &AlignArgs, config: &CompareConfig, out: &mut dyn Write) -> Result<()> {
    let baseline = read_text(&args.baseline)?;
    let current = read_text(&args.current)?;

    let alignment = Comparer::new()
        .with_config(config.clone())
        .align(&baseline, &current);
    info!(
        baseline = alignment.baseline.len(),
        current = alignment.current.len(),
        rows = alignment.pairs.len(),
        "Alignment finished"
    );

    match args.format {
        OutputFormat::Json => write_json(out, &alignment),
        OutputFormat::Text => render(&alignment, out),
    }
}

fn render(alignment: &ParagraphAlignment, out: &mut dyn Write) -> Result<()> {
    for pair in &alignment.pairs {
        let old = pair.old_index.map(|i| alignment.baseline[i].text.as_str());
        let new = pair.new_index.map(|i| alignment.current[i].text.as_str());
        let marker = match (old, new) {
            (Some(a), Some(b)) if a == b => '=',
            (Some(_), Some(_)) => '~',
            (Some(_), None) => '-',
            _ => '+',
        };
        writeln!(
            out,
            "{marker} {:<width$} | {}",
            old.map(|t| preview(t, COLUMN_WIDTH)).unwrap_or_default(),
            new.map(|t| preview(t, COLUMN_WIDTH)).unwrap_or_default(),
            width = COLUMN_WIDTH,
        )?;
    }
    Ok(())
}
