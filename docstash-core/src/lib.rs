//! Core of the docstash project: a small document store with upsert, predicate search
//! and lookup by identifier.
//!
//! This crate provides:
//!
//! - **Documents** ([`document`]) - The `Document` and `Author` records and their builders
//! - **Search requests and filters** ([`query`]) - `SearchRequest` and the expression tree it lowers into
//! - **Store backend abstraction** ([`backend`]) - The trait a storage implementation provides
//! - **Document store** ([`store`]) - `save`, `search` and `find_by_id` on top of a backend
//! - **Configuration** ([`config`]) - Match mode and id counter policy
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docstash::{prelude::*, memory::InMemoryStore};
//! use chrono::Utc;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! store.save(
//!     Document::builder(Author::new("a1", "Ada"), Utc::now())
//!         .title("Intro to X")
//!         .content("hello world")
//!         .build(),
//! )?;
//!
//! let found = store.search(&SearchRequest::builder().title_prefixes(["Intro"]).build())?;
//! assert_eq!(found.len(), 1);
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstash_core;

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
