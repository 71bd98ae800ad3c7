//! # Report Subcommand
//!
//! Renders the Markdown assessment report for a document, dated today.

use std::path::PathBuf;

use clap::Args;
use rampart_core::render_report;

/// Arguments for the report subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the exported assessment document.
    pub document: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Renders the report, returning the process exit code.
pub fn run(args: &ReportArgs) -> anyhow::Result<u8> {
    let document = crate::document::load(&args.document)?;
    let markdown = render_report(
        &document.client_id,
        &document.assessment_data,
        chrono::Utc::now().date_naive(),
    );
    crate::document::emit(args.output.as_deref(), &markdown)?;
    Ok(0)
}
