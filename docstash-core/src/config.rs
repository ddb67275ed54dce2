//! Store configuration.
//!
//! Two behaviors of the store are selectable: how the active predicates of a
//! [`SearchRequest`](crate::query::SearchRequest) combine, and whether saving a
//! document with an explicit identifier moves the id counter. The defaults are
//! [`MatchMode::Any`] and [`IdPolicy::AdvancePastExplicit`].

use serde::{Deserialize, Serialize};

use crate::error::DocumentStoreResult;

/// How the active predicates of a search request are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A document matches if any active predicate matches. A request with no
    /// active predicates matches nothing.
    #[default]
    Any,
    /// A document matches only if every active predicate matches. A request with
    /// no active predicates matches everything.
    All,
}

/// What happens to the id counter when a document arrives with its own identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Raise the counter past the explicit id, so later generated ids cannot collide with it.
    #[default]
    AdvancePastExplicit,
    /// Store under the explicit id and leave the counter alone.
    KeepCounter,
}

/// Behavior knobs for a [`DocumentStore`](crate::store::DocumentStore).
///
/// # Example
///
/// ```ignore
/// use docstash::config::{StoreConfig, MatchMode};
///
/// let config = StoreConfig::from_json_str(r#"{ "match_mode": "all" }"#)?;
/// assert_eq!(config.match_mode, MatchMode::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub match_mode: MatchMode,
    pub id_policy: IdPolicy,
}

impl StoreConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON is malformed or names an unknown variant.
    pub fn from_json_str(raw: &str) -> DocumentStoreResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}
