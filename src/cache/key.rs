//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Derives the cache key for a request: `path + "-" + hex(sha256(query))`.
///
/// Method and headers are not part of the key. A request without a query
/// string hashes the empty string.
pub fn cache_key(path: &str, query: Option<&str>) -> String {
    let digest = Sha256::digest(query.unwrap_or_default().as_bytes());
    format!("{}-{}", path, hex::encode(digest))
}
