//! API Module
//!
//! HTTP handlers and routing for the read-through demo.
//!
//! # Endpoints
//! - `GET /api/posts` - Posts collection
//! - `GET /api/posts/:id` - One post with its author
//! - `GET /api/users` - Users collection
//! - `GET /api/users/:id` - One user
//! - `GET /api/cache/stats` - Key count of the store
//! - `GET /api/benchmark` - Cached vs uncached latency
//! - `GET /health` - Health check endpoint
//!
//! Resource endpoints accept `?skipCache=true` to bypass the cache.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
