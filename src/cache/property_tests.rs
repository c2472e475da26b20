//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU and structural guarantees of `PageCache`.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::cache::PageCache;

// == Strategies ==
/// Generates resource paths
fn key_strategy() -> impl Strategy<Value = String> {
    "/[a-z0-9_]{1,12}(\\.(html|css|js|png))?".prop_map(|s| s)
}

/// Generates payloads, including embedded zero bytes
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

fn content_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("text/plain".to_string()),
        Just("text/html".to_string()),
        Just("application/octet-stream".to_string()),
    ]
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, payload: Vec<u8> },
    Get { key: String },
}

/// Keys drawn from a small pool so gets hit and puts repeat keys
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    let pooled_key = (0usize..12).prop_map(|i| format!("/page{}", i));
    prop_oneof![
        (pooled_key.clone(), payload_strategy())
            .prop_map(|(key, payload)| CacheOp::Put { key, payload }),
        pooled_key.prop_map(|key| CacheOp::Get { key }),
    ]
}

fn distinct_keys(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Size never exceeds capacity after a put
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        keys in prop::collection::vec(key_strategy(), 1..200)
    ) {
        let mut cache = PageCache::new(capacity).unwrap();

        for key in distinct_keys(keys) {
            cache.put(key, "text/plain", b"x");
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // With N+1 distinct puts and no gets, only the first key is gone
    #[test]
    fn prop_lru_eviction_order(keys in prop::collection::vec(key_strategy(), 2..30)) {
        let keys = distinct_keys(keys);
        prop_assume!(keys.len() >= 2);

        let capacity = keys.len() - 1;
        let mut cache = PageCache::new(capacity).unwrap();
        for key in &keys {
            cache.put(key.clone(), "text/plain", key.as_bytes());
        }

        prop_assert!(cache.get(&keys[0]).is_none(), "Oldest key '{}' should be evicted", keys[0]);
        for key in keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_some(), "Key '{}' should still be cached", key);
        }
    }

    // A get moves the key out of the eviction slot
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(key_strategy(), 3..12),
        new_key in key_strategy()
    ) {
        let keys = distinct_keys(keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let mut cache = PageCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.put(key.clone(), "text/plain", key.as_bytes());
        }

        prop_assert!(cache.get(&keys[0]).is_some());
        cache.put(new_key.clone(), "text/plain", b"new");

        prop_assert!(cache.get(&keys[0]).is_some(), "Touched key should survive");
        prop_assert!(cache.get(&keys[1]).is_none(), "Second oldest key should be evicted");
        prop_assert!(cache.get(&new_key).is_some(), "New key should exist");
    }

    // Put then get returns the same content type and exact bytes
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        content_type in content_type_strategy(),
        payload in payload_strategy()
    ) {
        let mut cache = PageCache::new(4).unwrap();

        cache.put(key.clone(), content_type.clone(), &payload);

        let entry = cache.get(&key).unwrap();
        prop_assert_eq!(entry.key(), key.as_str());
        prop_assert_eq!(entry.content_type(), content_type.as_str());
        prop_assert_eq!(entry.payload(), payload.as_slice());
        prop_assert_eq!(entry.len(), payload.len());
    }

    // Re-putting a key leaves exactly one entry holding the newest payload
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let mut cache = PageCache::new(4).unwrap();

        cache.put(key.clone(), "text/plain", &first);
        cache.put(key.clone(), "text/plain", &second);

        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.get(&key).unwrap().payload(), second.as_slice());
        prop_assert!(cache.check_structure().is_ok());
    }

    // Arbitrary put/get sequences keep list, arena and index in agreement and
    // match a simple reference model of LRU order
    #[test]
    fn prop_structure_matches_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache = PageCache::new(capacity).unwrap();
        // Most recent first
        let mut model: Vec<String> = Vec::new();
        let mut payloads: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { key, payload } => {
                    cache.put(key.clone(), "application/octet-stream", &payload);
                    model.retain(|k| k != &key);
                    model.insert(0, key.clone());
                    payloads.insert(key, payload);
                    if model.len() > capacity {
                        if let Some(evicted) = model.pop() {
                            payloads.remove(&evicted);
                        }
                    }
                }
                CacheOp::Get { key } => {
                    let found = cache.get(&key).map(|entry| entry.payload().to_vec());
                    match payloads.get(&key) {
                        Some(expected) => {
                            prop_assert_eq!(found.as_ref(), Some(expected));
                            model.retain(|k| k != &key);
                            model.insert(0, key);
                        }
                        None => prop_assert!(found.is_none()),
                    }
                }
            }

            if let Err(msg) = cache.check_structure() {
                prop_assert!(false, "Structure check failed: {}", msg);
            }
            let order: Vec<String> = cache.keys_by_recency().map(str::to_string).collect();
            prop_assert_eq!(&order, &model);
        }
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_cache_misses_everything() {
        let mut cache = PageCache::new(8).unwrap();
        for key in ["/", "/index.html", "", "/a/b/c"] {
            assert!(cache.get(key).is_none());
        }
    }

    #[test]
    fn test_long_alternating_sequence_stays_consistent() {
        let mut cache = PageCache::new(3).unwrap();

        for i in 0..1000 {
            let key = format!("/p{}", i % 7);
            if i % 3 == 0 {
                cache.get(&key);
            } else {
                cache.put(key, "text/plain", &[0u8; 4]);
            }
            cache.check_structure().unwrap();
        }
    }
}
