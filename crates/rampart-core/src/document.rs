//! Assessment documents: the per-client record the whole system revolves
//! around.
//!
//! A document wraps an [`AssessmentData`] tree of category-keyed policy lists
//! together with identity and timestamp metadata. Categories are held in a
//! `BTreeMap`, so every traversal (policy lookup, statistics, exports) walks
//! them in lexicographic order and two documents with the same content always
//! produce the same output.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::client::ClientId;
use crate::policy::Policy;

/// Format tag written into every persisted document.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Category-keyed policy lists, e.g. `"Conditional Access" -> [policy, ..]`.
///
/// Category names are free text chosen by the assessing engineer; policy ids
/// are expected to be unique across the whole tree but duplicates are
/// tolerated (see [`AssessmentData::duplicate_policy_ids`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct AssessmentData(BTreeMap<String, Vec<Policy>>);

impl AssessmentData {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a whole category.
    pub fn insert_category(&mut self, name: impl Into<String>, policies: Vec<Policy>) {
        self.0.insert(name.into(), policies);
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of policies across all categories.
    pub fn policy_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// True when the tree holds no policies at all.
    pub fn is_empty(&self) -> bool {
        self.policy_count() == 0
    }

    /// Iterates categories in lexicographic name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Policy])> {
        self.0.iter().map(|(name, policies)| (name.as_str(), policies.as_slice()))
    }

    /// Iterates every `(category, policy)` pair in scan order: categories
    /// lexicographically, policies in list order within each category.
    pub fn policies(&self) -> impl Iterator<Item = (&str, &Policy)> {
        self.0
            .iter()
            .flat_map(|(name, policies)| policies.iter().map(move |p| (name.as_str(), p)))
    }

    /// Finds the first policy with the given id in scan order.
    pub fn find_policy(&self, policy_id: &str) -> Option<&Policy> {
        self.policies().map(|(_, p)| p).find(|p| p.id == policy_id)
    }

    /// Replaces the first policy with id `policy_id` in scan order, returning
    /// the previous value, or `None` (tree untouched) when no policy matches.
    ///
    /// The replacement is stored verbatim, its id included, so a replacement
    /// carrying a different id renames the policy. Only the first occurrence
    /// is touched; when the same id appears more than once the later
    /// occurrences are left alone, and callers that care can check
    /// [`duplicate_policy_ids`] up front.
    ///
    /// [`duplicate_policy_ids`]: AssessmentData::duplicate_policy_ids
    pub fn replace_policy(&mut self, policy_id: &str, replacement: Policy) -> Option<Policy> {
        for policies in self.0.values_mut() {
            if let Some(slot) = policies.iter_mut().find(|p| p.id == policy_id) {
                return Some(std::mem::replace(slot, replacement));
            }
        }
        None
    }

    /// Ids that appear in more than one position across the tree, sorted and
    /// deduplicated. Empty for a well-formed document.
    pub fn duplicate_policy_ids(&self) -> Vec<String> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, policy) in self.policies() {
            *seen.entry(policy.id.as_str()).or_insert(0) += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

impl From<BTreeMap<String, Vec<Policy>>> for AssessmentData {
    fn from(map: BTreeMap<String, Vec<Policy>>) -> Self {
        Self(map)
    }
}

/// One client's complete assessment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDocument {
    /// Storage identity, assigned once at creation and stable thereafter.
    pub id: Uuid,
    /// Tenant the document belongs to. At most one document exists per client.
    #[schema(value_type = String)]
    pub client_id: ClientId,
    /// The category-keyed policy tree.
    pub assessment_data: AssessmentData,
    /// When the document was first created.
    pub created_at: DateTime<Utc>,
    /// When the document was last written.
    pub last_modified: DateTime<Utc>,
    /// Document format tag, currently [`DOCUMENT_VERSION`].
    pub version: String,
}

impl AssessmentDocument {
    /// Creates a fresh document around the given tree, stamping both
    /// timestamps with the current time.
    pub fn new(client_id: ClientId, assessment_data: AssessmentData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            assessment_data,
            created_at: now,
            last_modified: now,
            version: DOCUMENT_VERSION.to_string(),
        }
    }

    /// Bumps `last_modified` to the current time.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyStatus;
    use serde_json::json;

    fn policy(id: &str, name: &str) -> Policy {
        Policy {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            user_impact: String::new(),
            tech: String::new(),
            status: None,
            client_approval: None,
            notes: String::new(),
            rollout_date: String::new(),
        }
    }

    fn two_category_tree() -> AssessmentData {
        let mut data = AssessmentData::new();
        data.insert_category("Identity", vec![policy("p1", "MFA"), policy("p2", "Legacy auth")]);
        data.insert_category("Devices", vec![policy("p3", "Disk encryption")]);
        data
    }

    // -- Traversal order ---------------------------------------------------

    #[test]
    fn scan_order_is_category_name_then_list_position() {
        let data = two_category_tree();
        let ids: Vec<&str> = data.policies().map(|(_, p)| p.id.as_str()).collect();
        // "Devices" sorts before "Identity".
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[test]
    fn counts_span_all_categories() {
        let data = two_category_tree();
        assert_eq!(data.category_count(), 2);
        assert_eq!(data.policy_count(), 3);
        assert!(!data.is_empty());
        assert!(AssessmentData::new().is_empty());
    }

    // -- Lookup and replacement --------------------------------------------

    #[test]
    fn find_policy_returns_first_match_in_scan_order() {
        let mut data = two_category_tree();
        // Same id in both categories; "Devices" scans first.
        data.insert_category("Devices", vec![policy("p1", "Shadow")]);
        let found = data.find_policy("p1").unwrap();
        assert_eq!(found.name, "Shadow");
    }

    #[test]
    fn replace_policy_swaps_exactly_one_occurrence() {
        let mut data = two_category_tree();
        let mut replacement = policy("p2", "Legacy auth");
        replacement.status = Some(PolicyStatus::Compliant);

        let previous = data.replace_policy("p2", replacement).unwrap();
        assert_eq!(previous.status, None);
        assert_eq!(
            data.find_policy("p2").unwrap().status,
            Some(PolicyStatus::Compliant)
        );
        assert_eq!(data.policy_count(), 3);
    }

    #[test]
    fn replace_policy_of_unknown_id_leaves_tree_untouched() {
        let mut data = two_category_tree();
        let before = data.clone();
        assert!(data.replace_policy("p99", policy("p99", "Ghost")).is_none());
        assert_eq!(data, before);
    }

    #[test]
    fn replace_policy_stores_the_replacement_id_verbatim() {
        let mut data = two_category_tree();
        data.replace_policy("p2", policy("p2-renamed", "Legacy auth"));
        assert!(data.find_policy("p2").is_none());
        assert!(data.find_policy("p2-renamed").is_some());
    }

    #[test]
    fn replace_policy_with_duplicates_touches_only_the_first() {
        let mut data = AssessmentData::new();
        data.insert_category("A", vec![policy("dup", "First")]);
        data.insert_category("B", vec![policy("dup", "Second")]);

        let mut replacement = policy("dup", "Replaced");
        replacement.notes = "updated".to_string();
        data.replace_policy("dup", replacement);

        let names: Vec<&str> = data.policies().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, ["Replaced", "Second"]);
    }

    #[test]
    fn duplicate_ids_are_reported_sorted() {
        let mut data = AssessmentData::new();
        data.insert_category("A", vec![policy("z", "1"), policy("a", "2")]);
        data.insert_category("B", vec![policy("z", "3"), policy("a", "4"), policy("only", "5")]);
        assert_eq!(data.duplicate_policy_ids(), ["a", "z"]);
        assert!(two_category_tree().duplicate_policy_ids().is_empty());
    }

    // -- Wire format -------------------------------------------------------

    #[test]
    fn document_serializes_with_camel_case_metadata() {
        let doc = AssessmentDocument::new(
            ClientId::new("acme").unwrap(),
            two_category_tree(),
        );
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "clientId", "assessmentData", "createdAt", "lastModified", "version"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["version"], json!(DOCUMENT_VERSION));
        assert!(obj["assessmentData"].as_object().unwrap().contains_key("Identity"));
    }

    #[test]
    fn fresh_document_has_equal_timestamps() {
        let doc = AssessmentDocument::new(ClientId::new("acme").unwrap(), AssessmentData::new());
        assert_eq!(doc.created_at, doc.last_modified);
        assert_eq!(doc.version, DOCUMENT_VERSION);
    }
}
