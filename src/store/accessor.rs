//! Store Accessor
//!
//! The only entry point the fetch layer uses to reach the store. Every
//! backend failure is logged here and replaced by a neutral value, so an
//! unreachable store looks exactly like an empty one.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use super::{CacheStats, KvBackend};

// == Store Accessor ==
/// Fault-tolerant handle over a [`KvBackend`]. Cheap to clone.
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn KvBackend>,
}

impl KvStore {
    // == Constructor ==
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Wraps a concrete backend.
    pub fn from_backend<B: KvBackend + 'static>(backend: B) -> Self {
        Self::new(Arc::new(backend))
    }

    // == Get ==
    /// Stored value for `key`, or `None` on a miss or store failure.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(e) => {
                error!(key, error = %e, "kv get failed");
                None
            }
        }
    }

    // == Set ==
    /// Best-effort write. Returns whether the store acknowledged it.
    pub async fn set(&self, key: &str, value: &Value, ttl: Option<u64>) -> bool {
        match self.backend.set(key, value, ttl).await {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "kv set failed");
                false
            }
        }
    }

    // == Delete ==
    /// Best-effort delete. Missing keys count as success.
    pub async fn delete(&self, key: &str) -> bool {
        match self.backend.delete(key).await {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "kv delete failed");
                false
            }
        }
    }

    // == Count Keys ==
    /// Total keys in the store, zero when it cannot be reached.
    pub async fn count_keys(&self) -> u64 {
        match self.backend.dbsize().await {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "kv dbsize failed");
                0
            }
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        CacheStats::new(self.count_keys().await)
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").finish_non_exhaustive()
    }
}
