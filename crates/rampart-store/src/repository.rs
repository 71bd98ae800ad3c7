//! Assessment repository: the one-document-per-client contract on top of
//! [`DocumentStore`].

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rampart_core::{
    baseline_template, AssessmentData, AssessmentDocument, ClientId, Policy, DOCUMENT_VERSION,
};
use thiserror::Error;
use uuid::Uuid;

use crate::memory::DocumentStore;

/// Failure modes of repository operations that address existing state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No assessment has been saved for the client yet.
    #[error("no assessment stored for client {0}")]
    ClientNotFound(ClientId),

    /// The client's assessment holds no policy with the given id.
    #[error("policy {policy_id:?} not found in the assessment for client {client_id}")]
    PolicyNotFound {
        /// Client whose document was searched.
        client_id: ClientId,
        /// The id that matched nothing.
        policy_id: String,
    },
}

/// Client-addressed access to assessment documents.
///
/// The store underneath is keyed by document id and tolerates several
/// documents per client (for example after rehydrating duplicate rows); the
/// repository collapses that to one canonical document per client, the oldest
/// by `created_at` with ties broken by document id. Writes always land on the
/// canonical document.
///
/// Writes are last-write-wins at whole-document granularity: there is no
/// version token, and a later `save` overwrites the entire tree regardless of
/// what it was loaded from.
#[derive(Debug, Clone)]
pub struct AssessmentRepository {
    store: DocumentStore,
}

impl AssessmentRepository {
    /// Creates a repository over an empty store.
    pub fn new() -> Self {
        Self {
            store: DocumentStore::new(),
        }
    }

    /// The client's canonical stored document, if any.
    pub fn find(&self, client_id: &ClientId) -> Option<AssessmentDocument> {
        self.store.find_by_client(client_id).into_iter().next()
    }

    /// The client's stored document, or a fresh baseline-template document
    /// when none exists.
    ///
    /// The fresh document is NOT persisted; a client only gains a stored
    /// document through [`save`]. Calling this twice for an unknown client
    /// returns two documents with distinct ids.
    ///
    /// [`save`]: AssessmentRepository::save
    pub fn get_or_create(&self, client_id: &ClientId) -> AssessmentDocument {
        self.find(client_id).unwrap_or_else(|| {
            AssessmentDocument::new(client_id.clone(), baseline_template())
        })
    }

    /// Upserts the client's assessment tree.
    ///
    /// When a document already exists its id and `created_at` survive and
    /// only the tree, `last_modified`, and the format tag are rewritten;
    /// otherwise a fresh document is created. Returns the stored document.
    pub fn save(&self, client_id: &ClientId, data: AssessmentData) -> AssessmentDocument {
        self.store.with_table(|table| {
            let existing = canonical_id(table, client_id).and_then(|id| table.remove(&id));
            let document = match existing {
                Some(mut document) => {
                    document.assessment_data = data;
                    document.version = DOCUMENT_VERSION.to_string();
                    document.touch();
                    document
                }
                None => AssessmentDocument::new(client_id.clone(), data),
            };
            table.insert(document.id, document.clone());
            document
        })
    }

    /// Replaces one policy wholesale inside the client's stored assessment.
    ///
    /// The first policy matching `policy_id` in scan order is overwritten
    /// with `replacement` exactly as given; fields absent from the
    /// replacement do not survive from the old value. Fails when the client
    /// has no stored document or no policy matches.
    pub fn update_policy(
        &self,
        client_id: &ClientId,
        policy_id: &str,
        replacement: Policy,
    ) -> Result<AssessmentDocument, RepositoryError> {
        self.store.with_table(|table| {
            let id = canonical_id(table, client_id)
                .ok_or_else(|| RepositoryError::ClientNotFound(client_id.clone()))?;
            let document = table
                .get_mut(&id)
                .ok_or_else(|| RepositoryError::ClientNotFound(client_id.clone()))?;
            if document
                .assessment_data
                .replace_policy(policy_id, replacement)
                .is_none()
            {
                return Err(RepositoryError::PolicyNotFound {
                    client_id: client_id.clone(),
                    policy_id: policy_id.to_string(),
                });
            }
            document.touch();
            Ok(document.clone())
        })
    }

    /// One `(client, last_modified)` pair per client with a stored document,
    /// ordered by client id. Clients with several stored documents report
    /// their canonical document's timestamp.
    pub fn summaries(&self) -> Vec<(ClientId, DateTime<Utc>)> {
        let mut canonical: BTreeMap<ClientId, AssessmentDocument> = BTreeMap::new();
        for document in self.store.list() {
            match canonical.get(&document.client_id) {
                Some(existing)
                    if (existing.created_at, existing.id) <= (document.created_at, document.id) => {}
                _ => {
                    canonical.insert(document.client_id.clone(), document);
                }
            }
        }
        canonical
            .into_iter()
            .map(|(client_id, document)| (client_id, document.last_modified))
            .collect()
    }

    /// Inserts a document exactly as given, identity and timestamps included.
    /// This is the rehydration path; normal writes go through [`save`].
    ///
    /// [`save`]: AssessmentRepository::save
    pub fn restore(&self, document: AssessmentDocument) {
        self.store.insert(document);
    }

    /// Number of stored documents (not distinct clients).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for AssessmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Id of the client's canonical document: oldest `created_at`, ties broken by
/// document id.
fn canonical_id(table: &HashMap<Uuid, AssessmentDocument>, client_id: &ClientId) -> Option<Uuid> {
    table
        .values()
        .filter(|d| &d.client_id == client_id)
        .min_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|d| d.id)
}
