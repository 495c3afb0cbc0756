//! Read-Through Demo - a cache in front of a public REST API
//!
//! Serves posts and users from a key-value store when cached, otherwise from
//! the origin API, and reports where each response came from and how long
//! it took.

pub mod api;
pub mod bench;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use fetch::{FetchResult, OriginApi, ReadThrough, Source};
pub use store::{KvStore, MemoryKvBackend, RestKvBackend};
pub use tasks::spawn_cleanup_task;
