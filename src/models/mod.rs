//! Request and Response models for the key-value API
//!
//! This module defines the DTOs (Data Transfer Objects) shared by the server
//! handlers and the HTTP client.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{DeleteRequest, GetRequest, ListRequest, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, KeyValuePair, ListResponse,
    SetResponse,
};
