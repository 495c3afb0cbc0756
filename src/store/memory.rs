//! In-Process Backend
//!
//! HashMap storage with per-entry expiry. Expired entries are hidden on
//! read and physically removed by [`MemoryKvBackend::cleanup_expired`],
//! which the background sweeper calls periodically.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::entry::{current_timestamp_ms, CacheEntry};
use super::{KvBackend, StoreResult};

// == Memory Backend ==
/// Shared in-process key-value map. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvBackend {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryKvBackend {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Raw entry count, including expired entries not yet swept.
    pub async fn raw_len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KvBackend for MemoryKvBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &Value, ttl: Option<u64>) -> StoreResult<()> {
        let entry = CacheEntry::new(value.clone(), ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn dbsize(&self) -> StoreResult<u64> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        let live = entries.values().filter(|e| !e.is_expired_at(now)).count();
        Ok(live as u64)
    }
}
