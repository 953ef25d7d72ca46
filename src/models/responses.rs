//! Response DTOs for the key-value API
//!
//! Defines the structure of outgoing response bodies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response body for the GET operation (POST /get)
///
/// Absence is a normal result: `found` is false and `value` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    /// The stored value, empty when not found
    pub value: String,
    /// Whether a live entry exists
    pub found: bool,
}

impl GetResponse {
    /// Builds a response from a store lookup.
    pub fn from_lookup(value: Option<String>) -> Self {
        match value {
            Some(value) => Self { value, found: true },
            None => Self {
                value: String::new(),
                found: false,
            },
        }
    }
}

/// Response body for the SET operation (POST /set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResponse {
    pub success: bool,
}

impl SetResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response body for the DELETE operation (POST /delete)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always true when the operation ran
    pub success: bool,
    /// Whether an entry was present before removal
    pub existed: bool,
}

impl DeleteResponse {
    pub fn new(existed: bool) -> Self {
        Self {
            success: true,
            existed,
        }
    }
}

/// One pair in a LIST response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Response body for the LIST operation (POST /list)
///
/// The order of `pairs` is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub pairs: Vec<KeyValuePair>,
}

impl From<HashMap<String, String>> for ListResponse {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            pairs: map
                .into_iter()
                .map(|(key, value)| KeyValuePair { key, value })
                .collect(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Error category: "invalid_argument" or "internal"
    pub code: String,
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            error: error.into(),
        }
    }
}
