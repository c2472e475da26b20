//! Page Cache - A fixed-capacity LRU cache for served pages
//!
//! Maps a resource path to its content type and bytes, evicting the least
//! recently used page once capacity is reached. A small static file server
//! in `api` shows the intended use: look a path up before reading it from
//! disk, store it after.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod mime;
pub mod models;

pub use api::AppState;
pub use cache::{CacheEntry, PageCache};
pub use config::Config;
pub use error::CacheError;
