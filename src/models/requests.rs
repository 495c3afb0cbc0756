//! Request DTOs for the HTTP API
//!
//! Query strings accepted by the resource and benchmark endpoints.

use serde::Deserialize;

/// Query for the resource endpoints (`?skipCache=true`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchQuery {
    /// Raw flag; only the exact string `"true"` bypasses the cache
    #[serde(rename = "skipCache", default)]
    pub skip_cache: Option<String>,
}

impl FetchQuery {
    /// Whether the caller asked to bypass the cache.
    pub fn skip_cache(&self) -> bool {
        self.skip_cache.as_deref() == Some("true")
    }
}

/// Query for the benchmark endpoint (`?rounds=5`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkQuery {
    #[serde(default)]
    pub rounds: Option<u32>,
}
