//! # Csv Subcommand
//!
//! Renders the CSV export for a document. Day counts in the "Days Until
//! Rollout" column are relative to today.

use std::path::PathBuf;

use clap::Args;
use rampart_core::render_csv;

/// Arguments for the csv subcommand.
#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Path to the exported assessment document.
    pub document: PathBuf,

    /// Write the CSV here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Renders the CSV, returning the process exit code.
pub fn run(args: &CsvArgs) -> anyhow::Result<u8> {
    let document = crate::document::load(&args.document)?;
    let csv = render_csv(&document.assessment_data, chrono::Utc::now().date_naive());
    crate::document::emit(args.output.as_deref(), &csv)?;
    Ok(0)
}
