//! Storage backends for the revalidating cache.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Failed to serialize/deserialize a cache entry.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

/// A cached upstream document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
    /// The raw document body.
    pub body: String,
    /// When the body was fetched (seconds since the Unix epoch).
    pub fetched_at: u64,
}

impl CachedEntry {
    /// Create an entry fetched at `now`.
    pub fn new(body: impl Into<String>, now: u64) -> Self {
        Self {
            body: body.into(),
            fetched_at: now,
        }
    }

    /// Age in seconds at `now`.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.fetched_at)
    }

    /// Whether the entry is still fresh at `now` for the given TTL.
    pub fn is_fresh(&self, now: u64, ttl_secs: u64) -> bool {
        self.age(now) < ttl_secs
    }
}

/// Cache storage backend.
#[async_trait(?Send)]
pub trait CacheBackend {
    /// Get an entry.
    async fn get(&self, key: &str) -> CacheResult<Option<CachedEntry>>;

    /// Store an entry, replacing any previous one.
    async fn set(&self, key: &str, entry: CachedEntry) -> CacheResult<()>;
}

/// In-memory backend for tests and native runs.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RefCell<HashMap<String, CachedEntry>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedEntry>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CachedEntry) -> CacheResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), entry);
        Ok(())
    }
}

/// Backend over Spin's key-value store, with JSON-encoded entries.
#[cfg(target_arch = "wasm32")]
pub struct SpinKvBackend {
    store: spin_sdk::key_value::Store,
}

#[cfg(target_arch = "wasm32")]
impl SpinKvBackend {
    /// Open the default key-value store.
    pub fn open_default() -> CacheResult<Self> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(Self { store })
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl CacheBackend for SpinKvBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedEntry>> {
        match self.store.get(key) {
            Ok(Some(bytes)) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::Storage(e.to_string())),
        }
    }

    async fn set(&self, key: &str, entry: CachedEntry) -> CacheResult<()> {
        let bytes = serde_json::to_vec(&entry)?;
        self.store
            .set(key, &bytes)
            .map_err(|e| CacheError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_entry_freshness() {
        let entry = CachedEntry::new("{}", 1_000);

        assert_eq!(entry.age(1_030), 30);
        assert!(entry.is_fresh(1_059, 60));
        assert!(!entry.is_fresh(1_060, 60));
        // Clock skew never produces a negative age
        assert_eq!(entry.age(900), 0);
    }

    #[test]
    fn test_in_memory_roundtrip() {
        let backend = InMemoryBackend::new();
        assert!(backend.is_empty());

        block_on(async {
            assert_eq!(backend.get("k").await.unwrap(), None);
            backend.set("k", CachedEntry::new("a", 1)).await.unwrap();
            backend.set("k", CachedEntry::new("b", 2)).await.unwrap();
            assert_eq!(backend.get("k").await.unwrap(), Some(CachedEntry::new("b", 2)));
        });

        assert_eq!(backend.len(), 1);
    }
}
