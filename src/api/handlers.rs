//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    Json,
};
use reqwest::Client;

use crate::bench::{clamp_rounds, run_benchmark, BenchmarkReport};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::fetch::{FetchResult, OriginApi, PostDetail, ReadThrough};
use crate::models::{BenchmarkQuery, FetchQuery, HealthResponse};
use crate::store::{CacheStats, KvStore};

/// Application state shared across all handlers.
///
/// Built once at startup; clones share the store handle and HTTP client.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cached access to the origin API
    pub api: OriginApi,
}

impl AppState {
    /// Creates a new AppState around an existing origin client.
    pub fn new(api: OriginApi) -> Self {
        Self { api }
    }

    /// Wires a store into a fresh HTTP client and the configured origin.
    pub fn from_config(store: KvStore, config: &Config) -> Self {
        let fetcher = ReadThrough::new(store, Client::new());
        Self::new(OriginApi::new(
            fetcher,
            config.origin_base_url.clone(),
            config.default_ttl,
        ))
    }
}

/// Positive numeric `:id` path segment.
///
/// Rejections use the JSON error body instead of axum's plain-text one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
        if id == 0 {
            return Err(ApiError::InvalidRequest("id must be positive".to_string()));
        }
        Ok(Self(id))
    }
}

/// Handler for GET /api/posts
pub async fn posts_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResult>> {
    let result = state.api.fetch_posts(query.skip_cache()).await?;
    Ok(Json(result))
}

/// Handler for GET /api/posts/:id
///
/// Returns the post and its author, each with its own provenance.
pub async fn post_detail_handler(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<FetchQuery>,
) -> Result<Json<PostDetail>> {
    let detail = state.api.fetch_post_detail(id, query.skip_cache()).await?;
    Ok(Json(detail))
}

/// Handler for GET /api/users
pub async fn users_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResult>> {
    let result = state.api.fetch_users(query.skip_cache()).await?;
    Ok(Json(result))
}

/// Handler for GET /api/users/:id
pub async fn user_handler(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResult>> {
    let result = state.api.fetch_user(id, query.skip_cache()).await?;
    Ok(Json(result))
}

/// Handler for GET /api/cache/stats
///
/// Never fails; an unreachable store reports zero keys.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.api.store().stats().await)
}

/// Handler for GET /api/benchmark
pub async fn benchmark_handler(
    State(state): State<AppState>,
    Query(query): Query<BenchmarkQuery>,
) -> Result<Json<BenchmarkReport>> {
    let report = run_benchmark(&state.api, clamp_rounds(query.rounds)).await?;
    Ok(Json(report))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
