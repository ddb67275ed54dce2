//! Core types for document representation and serialization.
//!
//! A [`Document`] carries an optional string identifier, a title, content, an embedded
//! [`Author`] and a creation timestamp. Documents without an identifier are assigned
//! one by the store on their first save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value, to_value};

use crate::error::DocumentStoreResult;

/// Numeric key under which a document is stored.
///
/// Document identifiers travel as strings but are always the decimal rendering
/// of a positive `DocumentId`.
pub type DocumentId = u64;

/// Parses a string identifier into a [`DocumentId`].
///
/// Returns `None` for anything that is not a positive decimal integer.
pub fn parse_document_id(raw: &str) -> Option<DocumentId> {
    raw.parse::<DocumentId>()
        .ok()
        .filter(|id| *id > 0)
}

/// The author of a document. Embedded by value, with no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A stored record.
///
/// # Example
///
/// ```ignore
/// use docstash::prelude::*;
/// use chrono::Utc;
///
/// let document = Document::builder(Author::new("a1", "Ada"), Utc::now())
///     .title("Intro to X")
///     .content("hello world")
///     .build();
///
/// assert!(document.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Absent until the store assigns one. Never regenerated once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub author: Author,
    /// Supplied by the caller. The store never stamps or rewrites it.
    pub created: DateTime<Utc>,
}

impl Document {
    /// Creates a new builder. The author and creation time have no sensible
    /// defaults, so they are required up front.
    pub fn builder(author: Author, created: DateTime<Utc>) -> DocumentBuilder {
        DocumentBuilder::new(author, created)
    }

    /// Returns the identifier, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Builder for constructing [`Document`] instances with a fluent API.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new(author: Author, created: DateTime<Utc>) -> Self {
        Self {
            document: Document {
                id: None,
                title: String::new(),
                content: String::new(),
                author,
                created,
            },
        }
    }

    /// Sets an explicit identifier, turning a later save into an upsert on that id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.document.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.document.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.document.content = content.into();
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

/// Extension trait providing JSON conversion for the store's data shapes.
pub trait JsonExt: Serialize + DeserializeOwned {
    /// Converts this value to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    /// Creates a value from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

impl JsonExt for Author {}
impl JsonExt for Document {}
