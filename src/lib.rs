//! KV Store - An in-memory key-value store server
//!
//! Provides Get, Set, Delete and List over HTTP, with optional per-key TTL
//! expiration evaluated lazily on access.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use client::KvClient;
pub use config::Config;
pub use store::{MemoryStore, Storage};
