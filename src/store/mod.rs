//! Store Module
//!
//! In-memory key-value storage with lazy per-key TTL expiration.

mod entry;
mod memory;


use std::collections::HashMap;

use crate::error::Result;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;

// == Storage Trait ==
/// Operations the request handler needs from a store.
///
/// Implementations are shared between concurrent requests, so every method
/// takes `&self` and synchronises internally.
pub trait Storage: Send + Sync {
    /// Returns the value of a live key, or None if it is absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Inserts or replaces a key. A strictly positive `ttl_seconds` makes it
    /// expire; anything else makes it persistent.
    fn set(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<()>;

    /// Removes a key, reporting whether an entry was physically present.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Returns at most `limit` live pairs, in no particular order.
    fn list(&self, limit: i64) -> Result<HashMap<String, String>>;
}
