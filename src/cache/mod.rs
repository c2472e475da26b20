//! Cache Module
//!
//! Provides a fixed-capacity in-memory page cache with LRU eviction.

mod arena;
mod entry;
mod list;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use store::PageCache;
