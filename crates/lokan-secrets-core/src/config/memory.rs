//! In-memory selection source

use parking_lot::RwLock;

use super::traits::{non_empty, ConfigSource};

/// In-memory selection source for testing and embedding
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    backend: RwLock<Option<String>>,
}

impl MemoryConfigSource {
    /// Create a source with no backend configured
    pub fn new() -> Self {
        Self {
            backend: RwLock::new(None),
        }
    }

    /// Create a source naming `backend`
    pub fn with_backend(backend: impl Into<String>) -> Self {
        Self {
            backend: RwLock::new(Some(backend.into())),
        }
    }

    /// Set the configured backend name
    pub fn set_backend(&self, backend: impl Into<String>) {
        *self.backend.write() = Some(backend.into());
    }

    /// Clear the configured backend name
    pub fn clear(&self) {
        *self.backend.write() = None;
    }
}

impl ConfigSource for MemoryConfigSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn backend_name(&self) -> Option<String> {
        non_empty(self.backend.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source() {
        let source = MemoryConfigSource::new();
        assert_eq!(source.backend_name(), None);

        source.set_backend("sealed-kv");
        assert_eq!(source.backend_name(), Some("sealed-kv".to_string()));

        source.set_backend("");
        assert_eq!(source.backend_name(), None);

        source.set_backend("env");
        source.clear();
        assert_eq!(source.backend_name(), None);

        assert_eq!(MemoryConfigSource::with_backend("env").backend_name(), Some("env".to_string()));
    }
}
