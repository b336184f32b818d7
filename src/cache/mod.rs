//! Cache Module
//!
//! Provides the in-memory TTL cache for proxied response bodies and the
//! request-to-key derivation.

mod entry;
mod key;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use key::cache_key;
pub use store::ResponseCache;
