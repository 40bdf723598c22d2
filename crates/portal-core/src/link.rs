use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored link record in the repository.
///
/// The record is immutable after creation except for `visit_count`, which
/// only ever grows and is mutated exclusively through
/// [`Repository::increment_visit`][crate::Repository::increment_visit].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record expires, if ever. Strictly after `created_at`.
    pub expires_at: Option<Timestamp>,
    /// Number of successful redirects served for this code.
    pub visit_count: u64,
}

impl LinkRecord {
    /// Creates a fresh record with a zero visit count.
    pub fn new(original_url: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            original_url: original_url.into(),
            created_at,
            expires_at: None,
            visit_count: 0,
        }
    }

    /// Sets the expiration timestamp.
    pub fn with_expires_at(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the record is expired as of `now`.
    ///
    /// Expiry is a read-time classification; records are never deleted when
    /// they pass their expiration timestamp.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}
