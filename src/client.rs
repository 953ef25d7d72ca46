//! HTTP Client
//!
//! Typed async client for the key-value API, used by `kvstore-cli` and the
//! end-to-end tests.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::{
    DeleteRequest, DeleteResponse, ErrorResponse, GetRequest, GetResponse, HealthResponse,
    ListRequest, ListResponse, SetRequest, SetResponse,
};

/// Per-request timeout applied by [`KvClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error status
    #[error("server returned {status} ({code}): {message}")]
    Server {
        status: StatusCode,
        code: String,
        message: String,
    },

    /// The request never got a usable answer
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns `true` if the server rejected the request as malformed.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClientError::Server { status, .. } if status.is_client_error())
    }
}

/// Client for one key-value server.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct KvClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl KvClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:9090`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the value of `key`, or None if it is absent or expired.
    pub async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let req = GetRequest {
            key: key.to_string(),
        };
        let resp: GetResponse = self.call("/get", &req).await?;
        Ok(resp.found.then_some(resp.value))
    }

    /// Stores `value` under `key`; a positive `ttl_seconds` makes it expire.
    pub async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<i64>,
    ) -> Result<bool, ClientError> {
        let req = SetRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl_seconds,
        };
        let resp: SetResponse = self.call("/set", &req).await?;
        Ok(resp.success)
    }

    /// Deletes `key`, returning whether it existed.
    pub async fn delete(&self, key: &str) -> Result<bool, ClientError> {
        let req = DeleteRequest {
            key: key.to_string(),
        };
        let resp: DeleteResponse = self.call("/delete", &req).await?;
        Ok(resp.existed)
    }

    /// Lists up to `limit` live pairs; None lets the server pick its default.
    pub async fn list(&self, limit: Option<i32>) -> Result<HashMap<String, String>, ClientError> {
        let resp: ListResponse = self.call("/list", &ListRequest { limit }).await?;
        Ok(resp
            .pairs
            .into_iter()
            .map(|pair| (pair.key, pair.value))
            .collect())
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;
        decode(response).await
    }

    async fn call<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decodes a success body, or turns an error status into [`ClientError::Server`].
async fn decode<Resp: DeserializeOwned>(response: reqwest::Response) -> Result<Resp, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await?;
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => (body.code, body.error),
        Err(_) => ("unknown".to_string(), text),
    };

    Err(ClientError::Server {
        status,
        code,
        message,
    })
}
