//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of pages the cache can hold
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Directory files are served from
    pub serve_root: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached pages (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3490)
    /// - `SERVE_ROOT` - Directory to serve files from (default: ./serverroot)
    ///
    /// A zero capacity is passed through unchanged and rejected when the
    /// cache is built.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_capacity),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            serve_root: env::var("SERVE_ROOT")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.serve_root),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 10,
            server_port: 3490,
            serve_root: PathBuf::from("./serverroot"),
        }
    }
}
