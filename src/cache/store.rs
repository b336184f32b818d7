//! Cache Store Module
//!
//! TTL key-value store for captured response bodies, guarded by a single
//! reader/writer lock.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;

use crate::cache::CacheEntry;

// == Response Cache ==
/// In-memory response cache with per-key expiration.
///
/// Readers share the lock; `set` and `sweep` take it exclusively. There is no
/// size bound: entries leave the map only through `sweep` or by being
/// overwritten.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the value for `key` if present and not yet expired.
    ///
    /// Expired entries that have not been swept yet are reported as absent
    /// and left in place.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous value and
    /// expiration. The entry expires `ttl` after this call.
    pub async fn set(&self, key: String, value: Bytes, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    // == Sweep ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unswept ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
