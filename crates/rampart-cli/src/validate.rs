//! # Validate Subcommand
//!
//! Strict schema check for exported assessment documents: parse with the
//! same types the API uses, then report blank required policy fields and
//! duplicate policy ids.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the exported assessment document.
    pub document: PathBuf,
}

/// Runs the check, returning the process exit code.
///
/// Exit 0 when the document is clean, 1 when it parses but carries
/// findings. A document that cannot be read or parsed at all surfaces as
/// an error, which `main` maps to exit 2.
pub fn run(args: &ValidateArgs) -> anyhow::Result<u8> {
    let document = crate::document::load(&args.document)?;

    let mut findings = 0usize;
    for (category, policy) in document.assessment_data.policies() {
        if let Err(err) = policy.validate() {
            println!("{category}: policy {:?}: {err}", policy.id);
            findings += 1;
        }
    }
    for id in document.assessment_data.duplicate_policy_ids() {
        println!("duplicate policy id {id:?}");
        findings += 1;
    }

    if findings > 0 {
        let noun = if findings == 1 { "finding" } else { "findings" };
        println!("invalid: {findings} {noun} in {}", args.document.display());
        return Ok(1);
    }

    println!(
        "ok: {} policies across {} categories (client {}, version {})",
        document.assessment_data.policy_count(),
        document.assessment_data.category_count(),
        document.client_id,
        document.version,
    );
    Ok(0)
}
