//! # Stats Subcommand
//!
//! Prints compliance statistics for a document as pretty JSON, in the same
//! shape the API serves from `GET /v1/clients/{client_id}/stats`.

use std::path::PathBuf;

use clap::Args;
use rampart_core::ComplianceStats;

/// Arguments for the stats subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to the exported assessment document.
    pub document: PathBuf,
}

/// Computes and prints the statistics, returning the process exit code.
pub fn run(args: &StatsArgs) -> anyhow::Result<u8> {
    let document = crate::document::load(&args.document)?;
    let stats = ComplianceStats::compute(&document.assessment_data);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(0)
}
