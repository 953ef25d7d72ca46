//! API Handlers
//!
//! Request handlers for each key-value operation. They validate the request,
//! call the store and map the outcome onto the response vocabulary.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    DeleteRequest, DeleteResponse, GetRequest, GetResponse, HealthResponse, ListRequest,
    ListResponse, SetRequest, SetResponse,
};
use crate::store::{MemoryStore, Storage};

/// Truncates a key for logging
fn log_key(key: &str) -> String {
    const MAX_LOG_LEN: usize = 16;
    match key.char_indices().nth(MAX_LOG_LEN) {
        Some((idx, _)) => format!("{}...", &key[..idx]),
        None => key.to_string(),
    }
}

/// Turns a failed validation into a client error.
fn reject(op: &str, message: Option<String>) -> Result<(), ApiError> {
    match message {
        Some(message) => {
            warn!(op, %message, "rejected request");
            Err(ApiError::InvalidArgument(message))
        }
        None => Ok(()),
    }
}

/// Maps a store failure to its outward category, logging server-side faults.
fn store_failure(op: &str, err: crate::error::StoreError) -> ApiError {
    let err = ApiError::from(err);
    if let ApiError::Internal(cause) = &err {
        error!(op, %cause, "store failure");
    }
    err
}

/// Application state shared across all handlers.
///
/// Holds one store behind `Arc<dyn Storage>`; the store does its own locking.
#[derive(Clone)]
pub struct AppState {
    /// Shared store
    pub store: Arc<dyn Storage>,
    /// Limit applied to List requests that carry none
    pub default_list_limit: i32,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: impl Storage + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Creates a new AppState around an already shared store.
    pub fn with_store(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            default_list_limit: Config::default().default_list_limit,
        }
    }

    /// Creates a new AppState with an empty [`MemoryStore`] from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_list_limit: config.default_list_limit,
            ..Self::new(MemoryStore::new())
        }
    }
}

/// Handler for POST /get
///
/// A missing key is not an error: the response carries `found = false`.
pub async fn get_handler(
    State(state): State<AppState>,
    Json(req): Json<GetRequest>,
) -> Result<Json<GetResponse>, ApiError> {
    reject("get", req.validate())?;
    debug!("GET {}", log_key(&req.key));

    let value = state.store.get(&req.key);

    Ok(Json(GetResponse::from_lookup(value)))
}

/// Handler for POST /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>, ApiError> {
    reject("set", req.validate())?;

    let ttl_display = match req.ttl_seconds {
        Some(ttl) if ttl > 0 => format!("{}s", ttl),
        _ => "never".to_string(),
    };
    debug!("SET {} (ttl: {})", log_key(&req.key), ttl_display);

    state
        .store
        .set(&req.key, &req.value, req.ttl_seconds)
        .map_err(|err| store_failure("set", err))?;

    Ok(Json(SetResponse::ok()))
}

/// Handler for POST /delete
pub async fn delete_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    reject("delete", req.validate())?;
    debug!("DELETE {}", log_key(&req.key));

    let existed = state
        .store
        .delete(&req.key)
        .map_err(|err| store_failure("delete", err))?;

    Ok(Json(DeleteResponse::new(existed)))
}

/// Handler for POST /list
///
/// Pair order in the response is unspecified.
pub async fn list_handler(
    State(state): State<AppState>,
    Json(req): Json<ListRequest>,
) -> Result<Json<ListResponse>, ApiError> {
    reject("list", req.validate())?;

    let limit = req.limit.unwrap_or(state.default_list_limit);
    debug!("LIST (limit: {})", limit);

    let pairs = state
        .store
        .list(i64::from(limit))
        .map_err(|err| store_failure("list", err))?;

    Ok(Json(ListResponse::from(pairs)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
