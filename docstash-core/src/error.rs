//! Error types and result types for document store operations.
//!
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.
//! Note that "nothing matched" is never an error: lookups and searches report
//! it through `Option` and empty vectors.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreError {
    /// The caller passed a value the store cannot accept, such as a null document
    /// or an identifier that is not a positive integer.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Serialization/deserialization error when converting documents to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
