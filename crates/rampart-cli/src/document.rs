//! Loading and writing assessment documents on disk.
//!
//! Every subcommand starts from an exported document file, so the loader
//! lives here rather than in each handler. Parsing is strict: unknown
//! status strings or malformed metadata fail the load, mirroring what the
//! API would reject on upload.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rampart_core::AssessmentDocument;

/// Reads and parses an exported assessment document.
pub fn load(path: &Path) -> anyhow::Result<AssessmentDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as an assessment document", path.display()))?;
    Ok(document)
}

/// Writes rendered output to `output`, or to stdout when no path is given.
///
/// Files receive the content verbatim; stdout gets a terminating newline
/// when the content lacks one.
pub fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Wrote output file");
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
