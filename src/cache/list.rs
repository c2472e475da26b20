//! Recency List Module
//!
//! Doubly linked recency order over entries stored in an `EntryArena`.

use crate::cache::arena::{EntryArena, Handle};
use crate::cache::CacheEntry;

// == Recency List ==
/// Orders entries from most recently used (head) to least recently used (tail).
///
/// The list owns nothing: it only holds the endpoints and a count, and edits
/// the `prev`/`next` links stored in the arena slots. Every handle passed in
/// must be live in the arena it is used with.
#[derive(Debug, Default)]
pub struct RecencyList {
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert Head ==
    /// Links an unlinked entry in as the new head.
    pub fn insert_head(&mut self, arena: &mut EntryArena, handle: Handle) {
        self.link_head(arena, handle);
        self.len += 1;
    }

    // == Move To Head ==
    /// Promotes a linked entry to the head. No-op if it already is the head.
    pub fn move_to_head(&mut self, arena: &mut EntryArena, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.detach(arena, handle);
        self.link_head(arena, handle);
    }

    // == Remove Tail ==
    /// Unlinks the least recently used entry and returns its handle.
    ///
    /// The entry stays alive in the arena; the caller drops it from the index
    /// and releases it. Returns None only for an empty list.
    pub fn remove_tail(&mut self, arena: &mut EntryArena) -> Option<Handle> {
        let tail = self.tail?;
        self.unlink(arena, tail);
        Some(tail)
    }

    // == Unlink ==
    /// Splices an arbitrary linked entry out of the list.
    pub fn unlink(&mut self, arena: &mut EntryArena, handle: Handle) {
        self.detach(arena, handle);
        self.len -= 1;
    }

    // == Accessors ==
    #[allow(dead_code)]
    pub fn head(&self) -> Option<Handle> {
        self.head
    }

    pub fn tail(&self) -> Option<Handle> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resets the list without touching the arena.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Walks the list from head to tail.
    pub fn iter<'a>(&self, arena: &'a EntryArena) -> Iter<'a> {
        Iter {
            arena,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn link_head(&mut self, arena: &mut EntryArena, handle: Handle) {
        arena.set_prev(handle, None);
        match self.head {
            None => {
                arena.set_next(handle, None);
                self.tail = Some(handle);
            }
            Some(old_head) => {
                arena.set_next(handle, Some(old_head));
                arena.set_prev(old_head, Some(handle));
            }
        }
        self.head = Some(handle);
    }

    /// Joins the neighbours of `handle` and clears its own links.
    /// Does not touch the count.
    fn detach(&mut self, arena: &mut EntryArena, handle: Handle) {
        let prev = arena.prev(handle);
        let next = arena.next(handle);

        match prev {
            Some(prev) => arena.set_next(prev, next),
            None => self.head = next,
        }
        match next {
            Some(next) => arena.set_prev(next, prev),
            None => self.tail = prev,
        }

        arena.set_prev(handle, None);
        arena.set_next(handle, None);
    }
}

// == Iterator ==
/// Head-to-tail iterator over linked entries.
pub struct Iter<'a> {
    arena: &'a EntryArena,
    cursor: Option<Handle>,
    /// Bounds the walk by the list length so a broken link cannot loop forever
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Handle, &'a CacheEntry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.cursor?;
        let entry = self.arena.get(handle)?;
        self.cursor = self.arena.next(handle);
        self.remaining -= 1;
        Some((handle, entry))
    }
}
