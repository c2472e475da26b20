//! Cache Entry Module
//!
//! Defines a single cached resource: its key, content type and payload bytes.

// == Cache Entry ==
/// One cached resource.
///
/// Entries are immutable once created. The payload length is always the
/// length of the stored byte slice, so embedded zero bytes are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Resource path the entry is indexed by
    key: String,
    /// Content type tag, e.g. `text/html`
    content_type: String,
    /// Owned payload bytes
    payload: Box<[u8]>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, taking ownership of a copy of `payload`.
    ///
    /// # Arguments
    /// * `key` - The resource path
    /// * `content_type` - The content type tag
    /// * `payload` - The bytes to store
    pub fn new(key: impl Into<String>, content_type: impl Into<String>, payload: &[u8]) -> Self {
        Self {
            key: key.into(),
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }

    // == Accessors ==
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
