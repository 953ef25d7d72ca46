//! Store Entry Module
//!
//! Defines the structure for individual entries with optional expiration.

use std::time::{Duration, Instant};

// == Entry ==
/// A stored value and the instant it stops being visible.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry.
    ///
    /// A strictly positive `ttl_seconds` sets an expiration that many seconds
    /// from now. Zero, negative or absent TTLs make the entry persistent.
    pub fn new(value: String, ttl_seconds: Option<i64>) -> Self {
        let expires_at = ttl_seconds
            .filter(|ttl| *ttl > 0)
            .and_then(|ttl| Instant::now().checked_add(Duration::from_secs(ttl as u64)));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks expiration against a given instant.
    ///
    /// The boundary is inclusive: an entry whose expiration equals `now` is expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks expiration against the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
