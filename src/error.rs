//! Error types for the read-through demo
//!
//! Two failure families exist: store errors, which the accessor swallows,
//! and origin errors, which propagate to the HTTP caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

// == Store Error Enum ==
/// Failure talking to the key-value store.
///
/// Never leaves the store module: `KvStore` logs it and substitutes a
/// neutral value.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection refused, DNS failure, timeout, bad URL
    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store answered with a non-success HTTP status
    #[error("store returned HTTP {0}")]
    Status(u16),

    /// Store rejected the command
    #[error("store command failed: {0}")]
    Command(String),

    /// Reply could not be interpreted
    #[error("store reply could not be decoded: {0}")]
    Decode(String),
}

// == Origin Error Enum ==
/// Failure fetching a resource from the origin API.
#[derive(Error, Debug)]
pub enum OriginError {
    /// Network failure or malformed JSON body
    #[error("origin request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Origin answered with a non-success status
    #[error("origin returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

// == API Error Enum ==
/// Error surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream fetch failed
    #[error(transparent)]
    Origin(#[from] OriginError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Origin(e) => {
                warn!(error = %e, "origin fetch failed");
                StatusCode::BAD_GATEWAY
            }
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
