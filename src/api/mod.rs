//! API Module
//!
//! HTTP handlers and routing for the key-value store.
//!
//! # Endpoints
//! - `POST /get` - Look up a key
//! - `POST /set` - Store a key-value pair
//! - `POST /delete` - Delete a key
//! - `POST /list` - List live pairs
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
