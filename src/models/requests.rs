//! Request DTOs for the key-value API
//!
//! Defines the structure of incoming request bodies. Optional fields stay
//! `Option` so that "absent" and "zero" remain distinguishable on the wire.

use serde::{Deserialize, Serialize};

/// Request body for the GET operation (POST /get)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    /// The key to look up
    pub key: String,
}

/// Request body for the SET operation (POST /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: The value to store, may be empty
/// - `ttl_seconds`: Optional TTL; absent or non-positive means the key never expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequest {
    /// The key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<i64>,
}

/// Request body for the DELETE operation (POST /delete)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// The key to remove
    pub key: String,
}

/// Request body for the LIST operation (POST /list)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Maximum number of pairs; the server default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

/// Returns an error message when the key is empty.
pub(crate) fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("key cannot be empty".to_string());
    }
    None
}

impl GetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

impl SetRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

impl DeleteRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

impl ListRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        match self.limit {
            Some(limit) if limit < 0 => Some("limit cannot be negative".to_string()),
            _ => None,
        }
    }
}
