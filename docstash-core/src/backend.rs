//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait owns the two pieces of store state, the id-to-document
//! map and the id counter, and exposes the primitive operations the
//! [`DocumentStore`](crate::store::DocumentStore) composes into save, search and
//! lookup.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances

use std::fmt::Debug;

use crate::{
    config::IdPolicy,
    document::{Document, DocumentId},
    error::DocumentStoreResult,
    query::Expr,
};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Each operation that touches the
/// counter must read and update it together with the map write, so two saves can
/// never be handed the same generated id.
///
/// # Error Handling
///
/// "Not found" is never an error. Missing ids come back as `None`, and a query
/// that matches nothing returns an empty vector.
pub trait StoreBackend: Send + Sync + Debug {
    /// Stores a document that has no identifier.
    ///
    /// The backend assigns the current counter value as the document's id, stores it,
    /// advances the counter by one and returns the stored document.
    fn insert_new_document(&self, document: Document) -> DocumentStoreResult<Document>;

    /// Inserts or replaces the document stored under `id`.
    ///
    /// The document is stored exactly as given, including its own `id` string. Under [`IdPolicy::AdvancePastExplicit`] the counter is raised to at least `id + 1`.
    /// Under [`IdPolicy::KeepCounter`] it is left alone.
    fn upsert_document(
        &self,
        id: DocumentId,
        document: Document,
        policy: IdPolicy,
    ) -> DocumentStoreResult<Document>;

    /// Retrieves a copy of the document stored under `id`, if any.
    fn get_document(&self, id: DocumentId) -> DocumentStoreResult<Option<Document>>;

    /// Returns copies of every stored document matching `filter`, in no particular order.
    fn query_documents(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>>;

    /// Returns the number of stored documents.
    fn count_documents(&self) -> DocumentStoreResult<usize>;

    /// Returns the id the next identifier-less save will receive.
    fn next_id(&self) -> DocumentStoreResult<DocumentId>;
}

/// Factory trait for constructing backends.
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    /// Builds and returns the backend.
    fn build(self) -> DocumentStoreResult<Self::Backend>;
}
