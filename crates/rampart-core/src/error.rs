//! Validation errors for domain values.

use thiserror::Error;

/// Rejection produced when a caller-supplied value fails domain validation.
///
/// Every constructor that accepts untrusted input (`ClientId::new`,
/// `Policy::validate`) funnels its failures through this type so that
/// callers get one error to match on regardless of which field was bad.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The client identifier is empty, too long, or contains a character
    /// outside `[A-Za-z0-9_-]`.
    #[error("invalid client id {0:?}: expected 1-50 characters from [A-Za-z0-9_-]")]
    InvalidClientId(String),

    /// A policy field that must carry a non-empty string was empty.
    #[error("policy field {0:?} must be a non-empty string")]
    EmptyPolicyField(&'static str),
}
