//! Compliance statistics over an assessment tree.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::document::AssessmentData;
use crate::policy::{ClientApproval, PolicyStatus};

/// Aggregated counts and percentages over every policy in a document.
///
/// The status counts partition the total: each policy lands in exactly one of
/// `compliant`, `partial`, `non_compliant` or `pending`. Approval is counted
/// independently, so `approved` overlaps the status buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStats {
    /// Total number of policies.
    pub total: usize,
    /// Policies with status `Compliant`.
    pub compliant: usize,
    /// Policies with status `Partially Compliant`.
    pub partial: usize,
    /// Policies with status `Not-Compliant`.
    pub non_compliant: usize,
    /// Policies with no status recorded.
    pub pending: usize,
    /// Policies the client has approved, regardless of status.
    pub approved: usize,
    /// Each count as a whole percentage of the total.
    pub percentages: Percentages,
}

/// Whole-number percentages, rounded half away from zero; all zero when the
/// document holds no policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Percentages {
    /// Share of policies with status `Compliant`.
    pub compliant: u8,
    /// Share of policies with status `Partially Compliant`.
    pub partial: u8,
    /// Share of policies with status `Not-Compliant`.
    pub non_compliant: u8,
    /// Share of policies with no status recorded.
    pub pending: u8,
    /// Share of policies the client has approved.
    pub approved: u8,
}

impl ComplianceStats {
    /// Walks every policy in the tree once and tallies the buckets.
    pub fn compute(data: &AssessmentData) -> Self {
        let mut compliant = 0;
        let mut partial = 0;
        let mut non_compliant = 0;
        let mut pending = 0;
        let mut approved = 0;

        for (_, policy) in data.policies() {
            match policy.status {
                Some(PolicyStatus::Compliant) => compliant += 1,
                Some(PolicyStatus::PartiallyCompliant) => partial += 1,
                Some(PolicyStatus::NotCompliant) => non_compliant += 1,
                None => pending += 1,
            }
            if policy.client_approval == Some(ClientApproval::Approved) {
                approved += 1;
            }
        }

        let total = data.policy_count();
        Self {
            total,
            compliant,
            partial,
            non_compliant,
            pending,
            approved,
            percentages: Percentages {
                compliant: percentage(compliant, total),
                partial: percentage(partial, total),
                non_compliant: percentage(non_compliant, total),
                pending: percentage(pending, total),
                approved: percentage(approved, total),
            },
        }
    }
}

/// `count` as a whole percentage of `total`, rounded half away from zero so
/// that 1 of 3 yields 33 and 1 of 8 yields 13. Zero when `total` is zero.
fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}
