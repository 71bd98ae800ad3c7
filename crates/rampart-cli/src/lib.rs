//! # rampart-cli — Assessment Toolchain CLI
//!
//! Works on exported assessment documents (the JSON served by
//! `GET /v1/clients/{client_id}/assessment`) without a running server:
//! strict schema validation, compliance statistics, and the same Markdown
//! and CSV renderings the API serves.
//!
//! ## Subcommands
//!
//! - `validate` — strict schema check plus duplicate policy id detection
//! - `stats` — compliance statistics as pretty-printed JSON
//! - `report` — Markdown assessment report
//! - `csv` — CSV export
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to rampart-core — no domain logic here.
//! - Exit codes: 0 success, 1 validation findings, 2 unreadable input.

pub mod csv;
pub mod document;
pub mod report;
pub mod stats;
pub mod validate;
