//! The built-in baseline assessment template.

use crate::document::AssessmentData;
use crate::policy::Policy;

/// Returns the baseline tree handed to clients that have no stored
/// assessment yet: a single conditional-access category whose one policy is
/// unassessed (`status` and `clientApproval` both unset).
///
/// The template is a value, not shared state; every call builds a fresh
/// tree the caller is free to mutate.
pub fn baseline_template() -> AssessmentData {
    let mut data = AssessmentData::new();
    data.insert_category(
        "Conditional Access for Evaluated Accounts",
        vec![Policy {
            id: "policy_3".to_string(),
            name: "CT Baseline - Require MFA For Admins".to_string(),
            description: "Admin accounts are high-value targets for attackers.".to_string(),
            user_impact: "Admins are required to use MFA, which adds some extra steps during login."
                .to_string(),
            tech: String::new(),
            status: None,
            client_approval: None,
            notes: String::new(),
            rollout_date: String::new(),
        }],
    );
    data
}
