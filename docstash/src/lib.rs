//! Main docstash crate: an in-memory document store with upsert, predicate search
//! and lookup by identifier.
//!
//! This crate re-exports the core types from `docstash-core` and the in-memory
//! backend from `docstash-memory`.
//!
//! # Quick Start
//!
//! ```ignore
//! use docstash::{prelude::*, memory::InMemoryStore};
//! use chrono::Utc;
//!
//! fn main() -> DocumentStoreResult<()> {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!
//!     let intro = store.save(
//!         Document::builder(Author::new("a1", "Ada"), Utc::now())
//!             .title("Intro to X")
//!             .content("hello world")
//!             .build(),
//!     )?;
//!     assert_eq!(intro.id(), Some("1"));
//!
//!     let found = store.search(
//!         &SearchRequest::builder()
//!             .title_prefixes(["Intro"])
//!             .build(),
//!     )?;
//!     assert_eq!(found, vec![intro]);
//!
//!     assert!(store.find_by_id("abc")?.is_none());
//!     Ok(())
//! }
//! ```
//!
//! # Matching and id policy
//!
//! By default the active fields of a [`SearchRequest`](query::SearchRequest) are
//! joined with OR, and an empty request matches nothing. Saving a document with an
//! explicit id moves the id counter past it. Both behaviors can be switched through
//! [`StoreConfig`](config::StoreConfig):
//!
//! ```ignore
//! use docstash::{prelude::*, memory::InMemoryStore};
//!
//! let config = StoreConfig::default()
//!     .with_match_mode(MatchMode::All)
//!     .with_id_policy(IdPolicy::KeepCounter);
//! let store = DocumentStore::with_config(InMemoryStore::new(), config);
//! ```

pub mod prelude;

pub use docstash_core::{backend, config, document, error, query, store};

// Re-export the timestamp and JSON crates used in the public API.
pub use chrono;
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docstash_memory::{InMemoryStore, InMemoryStoreBuilder};
}
