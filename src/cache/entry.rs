//! Cache Entry Module
//!
//! Defines the structure for individual cached response bodies with TTL support.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A cached response body together with its expiration instant.
///
/// Value and expiration live in the same struct, so a key can never have one
/// without the other.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response body
    pub value: Bytes,
    /// Instant after which the entry is no longer visible to readers
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `value` - The body bytes to store
    /// * `ttl` - Time-to-live measured from the call
    pub fn new(value: Bytes, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration
    /// instant, so it is visible only while `now < expires_at`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
