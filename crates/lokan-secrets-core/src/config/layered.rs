//! Layered selection source with fallback behavior

use std::sync::Arc;

use super::traits::ConfigSource;

/// A selection source that consults several sources in priority order
///
/// The first source that names a backend wins. An empty chain names nothing.
///
/// # Example
///
/// ```
/// use lokan_secrets_core::config::{ConfigSource, EnvConfigSource, FileConfigSource, LayeredConfigSource};
/// use std::sync::Arc;
///
/// // LOKAN_SECRETS_BACKEND overrides the user file
/// let sources: Vec<Arc<dyn ConfigSource>> = vec![
///     Arc::new(EnvConfigSource::new()),
///     Arc::new(FileConfigSource::user()),
/// ];
/// let layered = LayeredConfigSource::new(sources);
/// assert_eq!(layered.sources().len(), 2);
/// ```
pub struct LayeredConfigSource {
    sources: Vec<Arc<dyn ConfigSource>>,
}

impl LayeredConfigSource {
    pub fn new(sources: Vec<Arc<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Get the sources in priority order
    pub fn sources(&self) -> &[Arc<dyn ConfigSource>] {
        &self.sources
    }

    /// Find which source currently names a backend
    pub fn find_source(&self) -> Option<&Arc<dyn ConfigSource>> {
        self.sources.iter().find(|s| s.backend_name().is_some())
    }
}

impl ConfigSource for LayeredConfigSource {
    fn name(&self) -> &str {
        "layered"
    }

    fn backend_name(&self) -> Option<String> {
        self.sources.iter().find_map(|s| s.backend_name())
    }
}
