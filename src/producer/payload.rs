//! Transport-agnostic message model.

use std::collections::HashMap;

/// A message handed to a [`Producer`](crate::producer::Producer).
///
/// Owned by the caller until passed to `send`; backends only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// Partitioning key for broker transports.
    pub key: String,

    /// Header mapping. Keys are unique; order is irrelevant and not
    /// guaranteed to survive translation into a transport's native shape.
    pub headers: HashMap<String, String>,

    /// Opaque message body.
    pub content: Vec<u8>,
}

impl Payload {
    /// Payload with a key and content, no headers.
    pub fn new(key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            headers: HashMap::new(),
            content: content.into(),
        }
    }

    /// Add one header, replacing any previous value for the key.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_replaces_previous_value() {
        let payload = Payload::new("k", b"body".to_vec())
            .with_header("a", "1")
            .with_header("a", "2");
        assert_eq!(payload.headers.len(), 1);
        assert_eq!(payload.headers["a"], "2");
    }
}
