//! Cached vs Uncached Benchmark
//!
//! Alternates cached and cache-bypassing requests for the posts and users
//! collections and reports the latency of each pair.

use serde::Serialize;
use tracing::info;

use crate::error::OriginError;
use crate::fetch::{OriginApi, Resource};
use crate::store::CacheStats;

/// Rounds run when the caller does not ask for a count.
pub const DEFAULT_ROUNDS: u32 = 5;
/// Upper bound on rounds per benchmark request.
pub const MAX_ROUNDS: u32 = 20;

// == Round Timing ==
/// One cached/uncached request pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTiming {
    /// 1-based round number
    pub id: u32,
    pub with_cache: f64,
    pub without_cache: f64,
    /// Percentage saved by the cached request
    pub improvement: f64,
}

impl RoundTiming {
    pub fn new(id: u32, with_cache: f64, without_cache: f64) -> Self {
        Self {
            id,
            with_cache,
            without_cache,
            improvement: improvement(with_cache, without_cache),
        }
    }
}

// == Benchmark Report ==
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub posts: Vec<RoundTiming>,
    pub users: Vec<RoundTiming>,
    /// Store snapshot taken after all rounds
    pub cache: CacheStats,
}

/// Percentage of `without_cache` saved by `with_cache`.
pub fn improvement(with_cache: f64, without_cache: f64) -> f64 {
    if without_cache <= 0.0 {
        return 0.0;
    }
    (without_cache - with_cache) / without_cache * 100.0
}

/// Applies the default and bounds to a requested round count.
pub fn clamp_rounds(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_ROUNDS).clamp(1, MAX_ROUNDS)
}

/// Runs `rounds` cached/uncached pairs for posts, then users.
///
/// # Errors
/// The first origin failure aborts the run.
pub async fn run_benchmark(api: &OriginApi, rounds: u32) -> Result<BenchmarkReport, OriginError> {
    let posts = run_series(api, Resource::Posts, rounds).await?;
    let users = run_series(api, Resource::Users, rounds).await?;
    let cache = api.store().stats().await;

    info!(rounds, keys = cache.keys, "benchmark finished");

    Ok(BenchmarkReport {
        posts,
        users,
        cache,
    })
}

async fn run_series(
    api: &OriginApi,
    resource: Resource,
    rounds: u32,
) -> Result<Vec<RoundTiming>, OriginError> {
    let mut timings = Vec::with_capacity(rounds as usize);
    for id in 1..=rounds {
        let cached = api.fetch(resource, false).await?;
        let uncached = api.fetch(resource, true).await?;
        timings.push(RoundTiming::new(id, cached.duration, uncached.duration));
    }
    Ok(timings)
}
