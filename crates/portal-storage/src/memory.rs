use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use portal_core::repository::{ReadRepository, Repository, Result};
use portal_core::{LinkRecord, ShortCode, StorageError};
use std::sync::Arc;

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap's sharded locks give the two guarantees the contract asks for
/// without a global lock: `entry` makes check-and-insert atomic per shard,
/// and `get_mut` serializes counter bumps on the same code.
///
/// Clones share the underlying map, so the shortener, redirector and stats
/// services can each hold a clone and still observe one store.
///
/// Expired records stay in the map: expiry is a read-time classification
/// and codes are never reused, so an expired entry still occupies its code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<DashMap<String, LinkRecord>>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Arc::new(DashMap::with_capacity(capacity)),
        }
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, record: LinkRecord) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn increment_visit(&self, code: &ShortCode) -> Result<()> {
        match self.storage.get_mut(code.as_str()) {
            Some(mut entry) => {
                entry.visit_count += 1;
                Ok(())
            }
            None => Err(StorageError::NotFound(code.to_string())),
        }
    }
}
