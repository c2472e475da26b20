//! Response models for the file server
//!
//! This module defines the JSON bodies returned by the HTTP layer.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse};
