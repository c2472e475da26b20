//! API Module
//!
//! HTTP handlers and routing for the file server that sits in front of the
//! page cache.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /` and `GET /*path` - Serve files through the cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
