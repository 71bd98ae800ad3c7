//! Policies and their status vocabulary.
//!
//! A [`Policy`] is one trackable security control inside an assessment, for
//! example "Require MFA for admins". Its compliance state and the client's
//! sign-off are closed enums; everything else is free text maintained by the
//! assessing engineer.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Compliance state recorded against a policy.
///
/// The wire strings are part of the stored-document format and are matched
/// byte-for-byte by existing exports, so they are not normalised here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PolicyStatus {
    /// The control is fully in place.
    #[serde(rename = "Compliant")]
    Compliant,
    /// The control is partially in place.
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    /// The control is absent or disabled.
    #[serde(rename = "Not-Compliant")]
    NotCompliant,
}

impl PolicyStatus {
    /// Returns the canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::PartiallyCompliant => "Partially Compliant",
            Self::NotCompliant => "Not-Compliant",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client sign-off on rolling a policy out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientApproval {
    /// The client has approved the rollout.
    Approved,
    /// The client has declined the rollout.
    Denied,
}

impl ClientApproval {
    /// Returns the canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for ClientApproval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity bucket derived from a policy's free-text user impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    /// Matched a low-severity keyword.
    Low,
    /// Matched a medium-severity keyword.
    Medium,
    /// Matched a high-severity keyword.
    High,
    /// Empty text, or no keyword matched.
    Unknown,
}

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "high",
    "significant",
    "major",
    "frequent",
    "disruption",
    "inconvenience",
    "locked out",
];

const MEDIUM_IMPACT_KEYWORDS: &[&str] = &["medium", "moderate", "some", "intermittent", "moderately"];

const LOW_IMPACT_KEYWORDS: &[&str] = &[
    "minimal",
    "low",
    "little",
    "slight",
    "minor",
    "no direct",
    "unlikely to experience",
];

impl ImpactLevel {
    /// Classifies free-text impact by case-insensitive keyword containment.
    ///
    /// Buckets are checked high, then medium, then low, so text matching more
    /// than one bucket lands in the most severe. Empty text is [`Unknown`].
    ///
    /// [`Unknown`]: ImpactLevel::Unknown
    pub fn classify(user_impact: &str) -> Self {
        if user_impact.is_empty() {
            return Self::Unknown;
        }
        let text = user_impact.to_lowercase();
        if HIGH_IMPACT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            Self::High
        } else if MEDIUM_IMPACT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            Self::Medium
        } else if LOW_IMPACT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            Self::Low
        } else {
            Self::Unknown
        }
    }

    /// Returns the lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trackable security control inside an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Stable identifier the policy is addressed by, e.g. `policy_3`.
    pub id: String,
    /// Short human-readable title.
    pub name: String,
    /// What the control does and why it matters.
    #[serde(default)]
    pub description: String,
    /// Free-text description of how end users are affected.
    #[serde(default)]
    pub user_impact: String,
    /// Technical owner responsible for the rollout.
    #[serde(default)]
    pub tech: String,
    /// Compliance state; `None` means not yet assessed.
    #[serde(default)]
    pub status: Option<PolicyStatus>,
    /// Client sign-off; `None` means no decision recorded.
    #[serde(default)]
    pub client_approval: Option<ClientApproval>,
    /// Engineer's working notes.
    #[serde(default)]
    pub notes: String,
    /// Planned rollout date as `YYYY-MM-DD`, or empty when unscheduled.
    #[serde(default)]
    pub rollout_date: String,
}

impl Policy {
    /// Checks the structural rules that deserialization alone cannot enforce:
    /// `id` and `name` must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyPolicyField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyPolicyField("name"));
        }
        Ok(())
    }

    /// Severity bucket for this policy's user impact text.
    pub fn impact_level(&self) -> ImpactLevel {
        ImpactLevel::classify(&self.user_impact)
    }
}
