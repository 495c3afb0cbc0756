//! Read-Through Fetch Helper
//!
//! Serves a resource from the store when present, otherwise fetches it from
//! the origin and stores it with a TTL. Store problems degrade to misses;
//! origin problems are returned to the caller.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::OriginError;
use crate::store::KvStore;

/// TTL in seconds applied to cached origin responses.
pub const DEFAULT_TTL: u64 = 300;

// == Source ==
/// Where a [`FetchResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Origin,
}

// == Fetch Result ==
/// Payload plus provenance and wall-clock time for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// The resource body
    pub data: Value,
    /// Cache hit or origin fetch
    pub source: Source,
    /// Elapsed milliseconds, including any cache lookup
    pub duration: f64,
}

// == Read-Through Helper ==
/// Cache-aside fetcher over a [`KvStore`] and an HTTP client.
#[derive(Debug, Clone)]
pub struct ReadThrough {
    store: KvStore,
    http: Client,
}

impl ReadThrough {
    pub fn new(store: KvStore, http: Client) -> Self {
        Self { store, http }
    }

    /// The underlying store accessor.
    pub fn store(&self) -> &KvStore {
        &self.store
    }

    /// Returns the resource at `url`, cached under `key` for `ttl` seconds.
    ///
    /// With `skip_cache` set the store is neither read nor written and the
    /// result always comes from the origin. Concurrent misses on the same
    /// key all reach the origin; the last write wins.
    ///
    /// # Errors
    /// Network failures, non-success statuses and malformed JSON from the
    /// origin. Nothing is cached in that case.
    pub async fn fetch_with_cache(
        &self,
        url: &str,
        key: &str,
        ttl: u64,
        skip_cache: bool,
    ) -> Result<FetchResult, OriginError> {
        let started = Instant::now();

        if !skip_cache {
            // A stored JSON null is indistinguishable from nothing useful
            if let Some(data) = self.store.get(key).await.filter(|v| !v.is_null()) {
                let duration = elapsed_ms(started);
                debug!(key, duration, "cache hit");
                return Ok(FetchResult {
                    data,
                    source: Source::Cache,
                    duration,
                });
            }
            debug!(key, "cache miss");
        }

        let data = self.fetch_origin(url).await?;

        if !skip_cache {
            self.store.set(key, &data, Some(ttl)).await;
        }

        let duration = elapsed_ms(started);
        debug!(key, url, duration, skip_cache, "served from origin");
        Ok(FetchResult {
            data,
            source: Source::Origin,
            duration,
        })
    }

    async fn fetch_origin(&self, url: &str) -> Result<Value, OriginError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OriginError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
