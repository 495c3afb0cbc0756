//! REST Key-Value Backend
//!
//! Talks to a hosted Redis-compatible service over HTTPS. Each operation is
//! a single `POST` of a JSON command array, authorised with a bearer token.
//! The service replies `{"result": ...}` on success and `{"error": "..."}`
//! when the command is rejected.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

use super::{KvBackend, StoreResult};
use crate::error::StoreError;

/// Reply envelope of the REST service.
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

// == REST Backend ==
/// Client for the hosted key-value REST service.
#[derive(Debug, Clone)]
pub struct RestKvBackend {
    http: Client,
    url: String,
    token: String,
}

impl RestKvBackend {
    /// Creates a backend with its own HTTP client.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url, token)
    }

    /// Creates a backend that reuses an existing HTTP client.
    pub fn with_client(http: Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            token: token.into(),
        }
    }

    /// Sends one command and returns the `result` field of the reply.
    async fn command(&self, args: Value) -> StoreResult<Value> {
        trace!(command = %args, "kv command");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&args)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let reply = serde_json::from_slice::<Reply>(&body);

        if let Ok(Reply {
            error: Some(message),
            ..
        }) = &reply
        {
            return Err(StoreError::Command(message.clone()));
        }
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        reply
            .map(|r| r.result)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Values are stored as JSON text. Strings that are not JSON come back as
/// plain strings.
fn decode_stored(result: Value) -> Option<Value> {
    match result {
        Value::Null => None,
        Value::String(text) => {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        }
        other => Some(other),
    }
}

#[async_trait]
impl KvBackend for RestKvBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let result = self.command(json!(["GET", key])).await?;
        Ok(decode_stored(result))
    }

    async fn set(&self, key: &str, value: &Value, ttl: Option<u64>) -> StoreResult<()> {
        let encoded =
            serde_json::to_string(value).map_err(|e| StoreError::Decode(e.to_string()))?;
        let args = match ttl.filter(|t| *t > 0) {
            Some(ttl) => json!(["SET", key, encoded, "EX", ttl]),
            None => json!(["SET", key, encoded]),
        };
        self.command(args).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.command(json!(["DEL", key])).await?;
        Ok(())
    }

    async fn dbsize(&self) -> StoreResult<u64> {
        let result = self.command(json!(["DBSIZE"])).await?;
        result
            .as_u64()
            .ok_or_else(|| StoreError::Decode(format!("DBSIZE returned {}", result)))
    }
}
