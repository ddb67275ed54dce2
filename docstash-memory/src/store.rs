//! In-memory storage implementation for document stores.
//!
//! Documents live in a `HashMap` keyed by their numeric id. The map and the id
//! counter sit behind a single read-write lock, so id assignment and the map write
//! it belongs to happen atomically.

use std::{collections::HashMap, sync::Arc};
use parking_lot::RwLock;

use docstash_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::IdPolicy,
    document::{Document, DocumentId},
    error::{DocumentStoreError, DocumentStoreResult},
    query::Expr,
};

use crate::evaluator::DocumentEvaluator;

const FIRST_ID: DocumentId = 1;

#[derive(Debug)]
struct StoreState {
    documents: HashMap<DocumentId, Document>,
    /// Strictly greater than every id handed out by `insert_new_document`.
    next_id: DocumentId,
}

impl StoreState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: HashMap::with_capacity(capacity),
            next_id: FIRST_ID,
        }
    }
}

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Clones
/// share the same documents and the same id counter.
///
/// Queries scan every stored document; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use docstash_memory::InMemoryStore;
/// use docstash::backend::StoreBackend;
///
/// let store = InMemoryStore::new();
/// let saved = store.insert_new_document(document)?;
/// assert_eq!(saved.id(), Some("1"));
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store whose counter starts at 1.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::with_capacity(capacity))),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

impl StoreBackend for InMemoryStore {
    fn insert_new_document(&self, mut document: Document) -> DocumentStoreResult<Document> {
        let mut state = self.state.write();

        let id = state.next_id;
        let next_id = id.checked_add(1).ok_or_else(|| {
            DocumentStoreError::Backend("document id space exhausted".to_string())
        })?;

        document.id = Some(id.to_string());
        state.documents.insert(id, document.clone());
        state.next_id = next_id;

        tracing::trace!(id, next_id, "assigned generated id");

        Ok(document)
    }

    fn upsert_document(
        &self,
        id: DocumentId,
        document: Document,
        policy: IdPolicy,
    ) -> DocumentStoreResult<Document> {
        let mut state = self.state.write();

        if policy == IdPolicy::AdvancePastExplicit && id >= state.next_id {
            state.next_id = id.checked_add(1).ok_or_else(|| {
                DocumentStoreError::InvalidArgument(format!(
                    "document id {id} leaves no room for generated ids"
                ))
            })?;
        }

        if state.documents.insert(id, document.clone()).is_some() {
            tracing::trace!(id, "replaced stored document");
        }

        Ok(document)
    }

    fn get_document(&self, id: DocumentId) -> DocumentStoreResult<Option<Document>> {
        Ok(
            self.state
                .read()
                .documents
                .get(&id)
                .cloned()
        )
    }

    fn query_documents(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>> {
        let state = self.state.read();

        DocumentEvaluator::filter_documents(state.documents.values(), filter)
    }

    fn count_documents(&self) -> DocumentStoreResult<usize> {
        Ok(self.state.read().documents.len())
    }

    fn next_id(&self) -> DocumentStoreResult<DocumentId> {
        Ok(self.state.read().next_id)
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use docstash_memory::InMemoryStore;
/// use docstash::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder().with_capacity(128).build()?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    capacity: usize,
}

impl InMemoryStoreBuilder {
    /// Pre-sizes the document map for roughly `capacity` documents.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::with_capacity(self.capacity))
    }
}
