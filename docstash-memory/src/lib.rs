//! In-memory document storage backend for docstash.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! All state is discarded when the store is dropped.
//!
//! # Features
//!
//! - **Single coarse lock** - The document map and the id counter are guarded together
//! - **Typed storage** - Documents are kept as `Document` values, no re-encoding
//! - **Full filter support** - Evaluates every `Expr` the query API can build
//!
//! # Quick Start
//!
//! ```ignore
//! use docstash::{prelude::*, memory::InMemoryStore};
//! use chrono::Utc;
//!
//! fn main() -> DocumentStoreResult<()> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build()?);
//!
//!     let saved = store.save(
//!         Document::builder(Author::new("a1", "Ada"), Utc::now())
//!             .title("Intro to X")
//!             .build(),
//!     )?;
//!
//!     assert_eq!(store.find_by_id(saved.id().unwrap())?, Some(saved));
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstash_memory;

pub mod store;
mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
