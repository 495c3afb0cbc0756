//! Store Module
//!
//! Key-value store access. Backends expose fallible raw operations through
//! [`KvBackend`]; [`KvStore`] is the accessor the rest of the crate uses and
//! turns every backend failure into a neutral value.

mod accessor;
mod entry;
mod memory;
mod rest;
mod stats;


use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

// Re-export public types
pub use accessor::KvStore;
pub use entry::CacheEntry;
pub use memory::MemoryKvBackend;
pub use rest::RestKvBackend;
pub use stats::CacheStats;

/// Result type for raw backend operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Backend Trait ==
/// Raw key-value operations against a concrete store.
///
/// Expiry is the backend's job: an entry written with `Some(ttl)` where
/// `ttl > 0` must stop being visible after `ttl` seconds. `None` or
/// `Some(0)` means the entry never expires.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Returns the stored value, `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: &Value, ttl: Option<u64>) -> StoreResult<()>;

    /// Removes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Number of keys currently held.
    async fn dbsize(&self) -> StoreResult<u64>;
}
