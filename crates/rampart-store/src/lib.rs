//! # rampart-store — Document Storage for the Rampart Assessment Tracker
//!
//! Two layers live here:
//!
//! - [`DocumentStore`] ([`memory`]): a thread-safe in-memory table of
//!   assessment documents keyed by document id. It knows nothing about the
//!   one-document-per-client rule.
//!
//! - [`AssessmentRepository`] ([`repository`]): the client-addressed contract
//!   the rest of the stack programs against. It enforces upsert-by-client
//!   semantics, selects a canonical document when duplicates exist, and is
//!   the only place compound read-modify-write operations are assembled.
//!
//! Both types are cheap to clone; clones share the same underlying table, so
//! a repository can be dropped into shared application state directly.

pub mod memory;
pub mod repository;

// Re-export primary types.
pub use memory::DocumentStore;
pub use repository::{AssessmentRepository, RepositoryError};
