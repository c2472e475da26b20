//! Entry Arena Module
//!
//! Slot storage that owns every live cache entry and addresses it through
//! generation-checked handles. Recency links live inside the slots so the
//! list can splice in O(1) without owning anything.

use crate::cache::CacheEntry;

// == Handle ==
/// Stable reference to an arena slot.
///
/// The generation is bumped every time a slot is released, so a handle kept
/// past the removal of its entry never resolves to whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

// == Node ==
/// A live entry plus its recency links.
#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<Handle>,
    next: Option<Handle>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

// == Entry Arena ==
/// Ownership root for cache entries.
#[derive(Debug, Default)]
pub struct EntryArena {
    slots: Vec<Slot>,
    /// Indices of vacant slots, reused before the vector grows
    free: Vec<usize>,
    len: usize,
}

impl EntryArena {
    // == Constructor ==
    /// Creates an arena with room for `capacity` entries plus the one that
    /// transiently exceeds capacity before eviction.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.saturating_add(1)),
            free: Vec::new(),
            len: 0,
        }
    }

    // == Insert ==
    /// Stores an unlinked entry and returns its handle.
    pub fn insert(&mut self, entry: CacheEntry) -> Handle {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return Handle {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        Handle {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    // == Remove ==
    /// Releases the entry behind `handle` and invalidates the handle.
    ///
    /// Returns None if the handle is stale. The caller must have unlinked
    /// the entry from the recency list first.
    pub fn remove(&mut self, handle: Handle) -> Option<CacheEntry> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(node.entry)
    }

    // == Lookup ==
    /// Returns the entry behind `handle`, or None if the handle is stale.
    pub fn get(&self, handle: Handle) -> Option<&CacheEntry> {
        self.node(handle).map(|node| &node.entry)
    }

    #[allow(dead_code)]
    pub fn contains(&self, handle: Handle) -> bool {
        self.node(handle).is_some()
    }

    // == Links ==
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).and_then(|node| node.prev)
    }

    pub fn next(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).and_then(|node| node.next)
    }

    pub fn set_prev(&mut self, handle: Handle, prev: Option<Handle>) {
        if let Some(node) = self.node_mut(handle) {
            node.prev = prev;
        } else {
            debug_assert!(false, "set_prev on stale handle {:?}", handle);
        }
    }

    pub fn set_next(&mut self, handle: Handle, next: Option<Handle>) {
        if let Some(node) = self.node_mut(handle) {
            node.next = next;
        } else {
            debug_assert!(false, "set_next on stale handle {:?}", handle);
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Releases every entry. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.len = 0;
    }

    fn node(&self, handle: Handle) -> Option<&Node> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }
}
