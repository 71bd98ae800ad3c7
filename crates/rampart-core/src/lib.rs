#![deny(missing_docs)]

//! # rampart-core — Foundational Types for the Rampart Assessment Tracker
//!
//! This crate defines the domain model every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `thiserror`, `chrono`, `uuid`, and `utoipa` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`ClientId`] is validated
//!    on construction; handlers and stores never pass raw strings around.
//!
//! 2. **Closed vocabularies.** [`PolicyStatus`] and [`ClientApproval`] are
//!    enums with exact wire strings. A document can never hold a status the
//!    rest of the stack does not understand.
//!
//! 3. **Deterministic traversal.** [`AssessmentData`] keeps categories in a
//!    `BTreeMap`, so lookups, statistics, and exports walk the same scan
//!    order on every run.
//!
//! 4. **Pure computation.** Statistics and export rendering are functions of
//!    the document value (plus an explicit date); nothing in this crate
//!    touches the clock except document construction, or does any I/O.

pub mod client;
pub mod document;
pub mod error;
pub mod policy;
pub mod report;
pub mod stats;
pub mod template;

// Re-export primary types at crate root for ergonomic imports.
pub use client::ClientId;
pub use document::{AssessmentData, AssessmentDocument, DOCUMENT_VERSION};
pub use error::ValidationError;
pub use policy::{ClientApproval, ImpactLevel, Policy, PolicyStatus};
pub use report::{render_csv, render_report, CSV_HEADER};
pub use stats::{ComplianceStats, Percentages};
pub use template::baseline_template;
