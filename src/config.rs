//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Public API the demo sits in front of.
pub const DEFAULT_ORIGIN_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Which key-value backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Hosted key-value service spoken to over HTTPS
    Rest,
    /// In-process map, for local runs without credentials
    Memory,
}

impl BackendKind {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("memory") {
            BackendKind::Memory
        } else {
            BackendKind::Rest
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the key-value REST service
    pub kv_url: String,
    /// Bearer token for the key-value REST service
    pub kv_token: String,
    /// Selected store backend
    pub backend: BackendKind,
    /// Base URL of the origin REST API
    pub origin_base_url: String,
    /// TTL in seconds applied to cached origin responses
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Sweep interval in seconds for the in-process backend
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KV_REST_API_URL` - Key-value service URL (default: empty)
    /// - `KV_REST_API_TOKEN` - Key-value service token (default: empty)
    /// - `KV_BACKEND` - `rest` or `memory` (default: rest)
    /// - `ORIGIN_BASE_URL` - Origin API (default: jsonplaceholder)
    /// - `DEFAULT_TTL` - Cache TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    ///
    /// Empty store credentials are accepted; every store call then fails
    /// and is treated as a miss.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            kv_url: env::var("KV_REST_API_URL").unwrap_or_default(),
            kv_token: env::var("KV_REST_API_TOKEN").unwrap_or_default(),
            backend: env::var("KV_BACKEND")
                .map(|v| BackendKind::parse(&v))
                .unwrap_or(defaults.backend),
            origin_base_url: env::var("ORIGIN_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.origin_base_url),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kv_url: String::new(),
            kv_token: String::new(),
            backend: BackendKind::Rest,
            origin_base_url: DEFAULT_ORIGIN_BASE_URL.to_string(),
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}
