//! Convenient re-exports of commonly used types from docstash.
//!
//! ```ignore
//! use docstash::prelude::*;
//! ```

pub use docstash_core::{
    store::DocumentStore,
    document::{Author, Document, DocumentBuilder, DocumentId, JsonExt},
    backend::{StoreBackend, StoreBackendBuilder},
    query::{SearchRequest, SearchRequestBuilder, Expr, Field, FieldOp, Filter, QueryVisitor, Value},
    config::{StoreConfig, MatchMode, IdPolicy},
    error::{DocumentStoreError, DocumentStoreResult},
};
