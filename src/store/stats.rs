//! Cache Statistics Module

use serde::Serialize;

// == Cache Stats ==
/// Diagnostic snapshot of the store, recomputed on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of keys currently in the store
    pub keys: u64,
}

impl CacheStats {
    /// Creates a snapshot for the given key count.
    pub fn new(keys: u64) -> Self {
        Self { keys }
    }
}
