//! Thread-safe in-memory document table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rampart_core::{AssessmentDocument, ClientId};
use uuid::Uuid;

/// Thread-safe, cloneable in-memory table of assessment documents keyed by
/// document id.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable, so a panicking writer does not
/// permanently corrupt the table. Clones share the same underlying table.
#[derive(Debug)]
pub struct DocumentStore {
    data: Arc<RwLock<HashMap<Uuid, AssessmentDocument>>>,
}

impl Clone for DocumentStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a document under its own id, returning the previous value if
    /// the id was already present.
    pub fn insert(&self, document: AssessmentDocument) -> Option<AssessmentDocument> {
        self.data.write().insert(document.id, document)
    }

    /// Retrieve a document by id.
    pub fn get(&self, id: &Uuid) -> Option<AssessmentDocument> {
        self.data.read().get(id).cloned()
    }

    /// List all documents, in no particular order.
    pub fn list(&self) -> Vec<AssessmentDocument> {
        self.data.read().values().cloned().collect()
    }

    /// All documents for one client, oldest first (ties broken by document
    /// id). The head of the returned list is the client's canonical document.
    pub fn find_by_client(&self, client_id: &ClientId) -> Vec<AssessmentDocument> {
        let mut documents: Vec<AssessmentDocument> = self
            .data
            .read()
            .values()
            .filter(|d| &d.client_id == client_id)
            .cloned()
            .collect();
        documents.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        documents
    }

    /// Return the number of documents.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the whole table under a single write lock.
    ///
    /// This is the read-validate-write primitive the repository builds its
    /// compound operations on; holding one lock for the whole closure
    /// eliminates TOCTOU races between lookup and mutation.
    pub(crate) fn with_table<R>(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, AssessmentDocument>) -> R,
    ) -> R {
        f(&mut self.data.write())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
