//! Error types for the key-value store
//!
//! `StoreError` is what the store reports; `ApiError` is what the request
//! handler hands back to callers. Each store error maps to exactly one
//! outward category: client input or server failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Errors produced by a [`Storage`](crate::store::Storage) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key is empty
    #[error("key cannot be empty")]
    InvalidKey,

    /// An argument other than the key is out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing structure is unusable
    #[error("internal store failure: {0}")]
    Internal(String),
}

/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// == Api Error Enum ==
/// Outward error categories of the request handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request was malformed; never worth retrying
    #[error("{0}")]
    InvalidArgument(String),

    /// The store failed while serving a well-formed request
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Short machine-readable code carried in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::Internal(_) => "internal",
        }
    }

    /// HTTP status for this category.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey | StoreError::InvalidArgument(_) => {
                ApiError::InvalidArgument(err.to_string())
            }
            StoreError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.code(), self.to_string()));
        (self.status(), body).into_response()
    }
}
