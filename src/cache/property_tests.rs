//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache and key derivation against simple models.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::{cache_key, ResponseCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates request paths
fn path_strategy() -> impl Strategy<Value = String> {
    "(/[a-z0-9]{1,8}){1,4}".prop_map(|s| s)
}

/// Generates raw query strings
fn query_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}=[a-zA-Z0-9]{0,8}(&[a-z]{1,6}=[a-zA-Z0-9]{0,8}){0,3}".prop_map(|s| s)
}

/// Generates keys from a small pool so writes collide
fn small_key_strategy() -> impl Strategy<Value = String> {
    "k[0-4]".prop_map(|s| s)
}

fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a body and reading it back before expiry returns the same bytes.
    #[test]
    fn prop_roundtrip_storage(key in path_strategy(), body in body_strategy()) {
        let cache = ResponseCache::new();

        let retrieved = tokio_test::block_on(async {
            cache.set(key.clone(), Bytes::from(body.clone()), TEST_TTL).await;
            cache.get(&key).await
        });

        prop_assert_eq!(retrieved, Some(Bytes::from(body)), "Round-trip value mismatch");
    }

    // A sequence of writes leaves each key holding its most recent value.
    #[test]
    fn prop_last_write_wins(
        writes in prop::collection::vec((small_key_strategy(), body_strategy()), 1..50)
    ) {
        let cache = ResponseCache::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        tokio_test::block_on(async {
            for (key, body) in &writes {
                cache.set(key.clone(), Bytes::from(body.clone()), TEST_TTL).await;
            }
        });
        for (key, body) in writes {
            model.insert(key, body);
        }

        prop_assert_eq!(tokio_test::block_on(cache.len()), model.len());
        for (key, body) in model {
            let stored = tokio_test::block_on(cache.get(&key));
            prop_assert_eq!(stored, Some(Bytes::from(body)));
        }
    }

    // Key derivation is a pure function of path and query.
    #[test]
    fn prop_key_deterministic(path in path_strategy(), query in query_strategy()) {
        prop_assert_eq!(
            cache_key(&path, Some(&query)),
            cache_key(&path, Some(&query))
        );
    }

    // Different query strings on the same path never share a key.
    #[test]
    fn prop_key_isolates_queries(
        path in path_strategy(),
        first in query_strategy(),
        second in query_strategy()
    ) {
        prop_assume!(first != second);
        prop_assert_ne!(cache_key(&path, Some(&first)), cache_key(&path, Some(&second)));
    }

    // The key always starts with the request path followed by a 64-char digest.
    #[test]
    fn prop_key_shape(path in path_strategy(), query in query_strategy()) {
        let key = cache_key(&path, Some(&query));
        let prefix = format!("{}-", path);
        prop_assert!(key.starts_with(&prefix));

        let digest = &key[prefix.len()..];
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
