use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;
use warren_core::error::StoreResult;
use warren_core::{RecordStore, ShortCode, StoreError};

/// In-memory implementation of [`RecordStore`] using DashMap.
///
/// DashMap shards its locks, so reads and writes to different keys do not
/// block each other, and `insert` is atomic through the entry API.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, Vec<u8>>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>> {
        trace!(code = %code, "reading record from memory");
        self.storage
            .get(code.as_str())
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        trace!(code = %code, "writing record to memory");
        self.storage.insert(code.as_str().to_owned(), value);
        Ok(())
    }

    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }
}
