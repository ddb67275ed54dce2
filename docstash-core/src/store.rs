//! Main document store interface.
//!
//! [`DocumentStore`] wraps a [`StoreBackend`] and implements the three store
//! operations on top of it:
//!
//! - [`save`](DocumentStore::save) - upsert, assigning an id when the document has none
//! - [`search`](DocumentStore::search) - predicate scan driven by a [`SearchRequest`]
//! - [`find_by_id`](DocumentStore::find_by_id) - lenient point lookup
//!
//! # Example
//!
//! ```ignore
//! use docstash::{prelude::*, memory::InMemoryStore};
//! use chrono::Utc;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let saved = store.save(
//!     Document::builder(Author::new("a1", "Ada"), Utc::now())
//!         .title("Intro to X")
//!         .build(),
//! )?;
//!
//! assert_eq!(saved.id(), Some("1"));
//! assert!(store.find_by_id("1")?.is_some());
//! ```

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{
    backend::StoreBackend,
    config::{MatchMode, StoreConfig},
    document::{Document, DocumentId, JsonExt, parse_document_id},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, SearchRequest},
};

/// A document store bound to a specific backend implementation.
///
/// Each store owns its state; two stores never share documents or id counters
/// unless they are built over clones of the same backend.
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
    config: StoreConfig,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend and the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Creates a new document store with an explicit configuration.
    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts or replaces a document.
    ///
    /// A document without an id receives the next counter value. A document with an
    /// id replaces whatever is stored under it. The `created` timestamp is stored
    /// exactly as supplied.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if the id is not a positive
    /// integer, or if it would push the id counter past its maximum.
    pub fn save(&self, document: Document) -> DocumentStoreResult<Document> {
        let Some(raw_id) = document.id.as_deref() else {
            let saved = self.backend.insert_new_document(document)?;
            debug!(id = saved.id(), generated = true, "saved document");
            return Ok(saved);
        };

        let id = self.resolve_explicit_id(raw_id)?;
        let saved = self
            .backend
            .upsert_document(id, document, self.config.id_policy)?;

        debug!(id = saved.id(), generated = false, policy = ?self.config.id_policy, "saved document");

        Ok(saved)
    }

    /// Saves a document given as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] for a JSON `null`,
    /// [`DocumentStoreError::Serialization`] if the value is not a document, and
    /// anything [`save`](Self::save) returns.
    pub fn save_json(&self, value: Value) -> DocumentStoreResult<Document> {
        if value.is_null() {
            warn!("rejected null document");
            return Err(DocumentStoreError::InvalidArgument(
                "document must not be null".to_string(),
            ));
        }

        self.save(Document::from_json(value)?)
    }

    /// Returns every stored document matching the request, in no particular order.
    ///
    /// Under [`MatchMode::Any`] a request with no active fields matches nothing.
    pub fn search(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        if self.config.match_mode == MatchMode::Any && request.is_unconstrained() {
            debug!("search request has no active filters; returning no documents");
            return Ok(vec![]);
        }

        let filter = request.to_expr(self.config.match_mode);
        let documents = self.backend.query_documents(&filter)?;
        debug!(matched = documents.len(), mode = ?self.config.match_mode, "searched documents");

        Ok(documents)
    }

    /// Searches with a request given as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] for a JSON `null` and
    /// [`DocumentStoreError::Serialization`] if the value is not a search request.
    pub fn search_json(&self, value: Value) -> DocumentStoreResult<Vec<Document>> {
        if value.is_null() {
            warn!("rejected null search request");
            return Err(DocumentStoreError::InvalidArgument(
                "search request must not be null".to_string(),
            ));
        }

        self.search(&SearchRequest::from_json(value)?)
    }

    /// Returns every stored document matching an arbitrary filter expression.
    pub fn query(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>> {
        self.backend.query_documents(filter)
    }

    /// Looks up a document by its string identifier.
    ///
    /// Identifiers that do not parse as positive integers, and ids that were never
    /// saved, both yield `Ok(None)`.
    pub fn find_by_id(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let Some(key) = parse_document_id(id) else {
            trace!(id, "lookup id is not numeric");
            return Ok(None);
        };

        let document = self.backend.get_document(key)?;

        if document.is_none() {
            trace!(id = key, "no document stored under id");
        }

        Ok(document)
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> DocumentStoreResult<usize> {
        self.backend.count_documents()
    }

    pub fn is_empty(&self) -> DocumentStoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns the id the next identifier-less save will receive.
    pub fn next_id(&self) -> DocumentStoreResult<DocumentId> {
        self.backend.next_id()
    }

    fn resolve_explicit_id(&self, raw: &str) -> DocumentStoreResult<DocumentId> {
        match parse_document_id(raw) {
            Some(id) => Ok(id),
            None => {
                warn!(id = raw, "rejected document id");
                Err(DocumentStoreError::InvalidArgument(format!(
                    "document id must be a positive integer, got {raw:?}"
                )))
            }
        }
    }
}
