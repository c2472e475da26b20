//! Page Cache Module
//!
//! Fixed-capacity LRU cache combining an entry arena, a recency list and a
//! key index. Both `get` and `put` are O(1).

use std::collections::HashMap;

use tracing::debug;

use crate::cache::arena::{EntryArena, Handle};
use crate::cache::list::RecencyList;
use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Page Cache ==
/// LRU cache mapping a resource path to its content type and bytes.
///
/// Not synchronized: share it across tasks behind a lock.
#[derive(Debug)]
pub struct PageCache {
    /// Owns every live entry
    entries: EntryArena,
    /// Recency order over `entries`
    order: RecencyList,
    /// Key -> handle lookup, never owns entry data
    index: HashMap<String, Handle>,
    /// Maximum number of live entries
    capacity: usize,
}

impl PageCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "cache capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: EntryArena::with_capacity(capacity),
            order: RecencyList::new(),
            index: HashMap::with_capacity(capacity),
            capacity,
        })
    }

    // == Put ==
    /// Stores a copy of `payload` under `key` as the most recently used entry.
    ///
    /// If `key` is already cached, the old entry is released and replaced.
    /// If the cache is over capacity afterwards, the least recently used
    /// entry is evicted.
    ///
    /// # Arguments
    /// * `key` - The resource path
    /// * `content_type` - The content type tag
    /// * `payload` - The bytes to cache
    pub fn put(&mut self, key: impl Into<String>, content_type: impl Into<String>, payload: &[u8]) {
        let key = key.into();

        if let Some(old) = self.index.remove(&key) {
            self.order.unlink(&mut self.entries, old);
            self.entries.remove(old);
            debug!(key = %key, "Replacing cached entry");
        }

        let entry = CacheEntry::new(key.clone(), content_type, payload);
        let handle = self.entries.insert(entry);
        self.order.insert_head(&mut self.entries, handle);
        self.index.insert(key, handle);

        if self.order.len() > self.capacity {
            self.evict_lru();
        }
    }

    // == Get ==
    /// Looks up `key` and marks it most recently used.
    ///
    /// Returns None on a miss. The returned view is valid until the next
    /// mutating call.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        let handle = *self.index.get(key)?;
        self.order.move_to_head(&mut self.entries, handle);
        self.entries.get(handle)
    }

    // == Contains ==
    /// Checks whether `key` is cached without touching its recency.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Keys By Recency ==
    /// Returns live keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.order.iter(&self.entries).map(|(_, entry)| entry.key())
    }

    // == Clear ==
    /// Releases every entry, keeping the cache usable.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.entries.clear();
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Evict ==
    fn evict_lru(&mut self) {
        let Some(tail) = self.order.remove_tail(&mut self.entries) else {
            return;
        };
        if let Some(evicted) = self.entries.remove(tail) {
            self.index.remove(evicted.key());
            debug!(
                key = %evicted.key(),
                content_type = %evicted.content_type(),
                bytes = evicted.len(),
                "Evicted least recently used entry"
            );
        }
    }

    // == Structure Check ==
    /// Verifies that arena, list and index agree with each other.
    #[cfg(test)]
    pub(crate) fn check_structure(&self) -> std::result::Result<(), String> {
        let len = self.order.len();
        if self.entries.len() != len || self.index.len() != len {
            return Err(format!(
                "size mismatch: list={} arena={} index={}",
                len,
                self.entries.len(),
                self.index.len()
            ));
        }
        if len > self.capacity {
            return Err(format!("size {} exceeds capacity {}", len, self.capacity));
        }

        let mut seen = std::collections::HashSet::new();
        let mut prev: Option<Handle> = None;
        for (handle, entry) in self.order.iter(&self.entries) {
            if self.entries.prev(handle) != prev {
                return Err(format!("broken prev link at '{}'", entry.key()));
            }
            if self.index.get(entry.key()) != Some(&handle) {
                return Err(format!("index does not point at '{}'", entry.key()));
            }
            if !seen.insert(entry.key().to_string()) {
                return Err(format!("key '{}' linked twice", entry.key()));
            }
            prev = Some(handle);
        }

        if seen.len() != len {
            return Err(format!("walked {} entries, expected {}", seen.len(), len));
        }
        if prev != self.order.tail() {
            return Err("tail does not match last walked entry".to_string());
        }
        Ok(())
    }
}
