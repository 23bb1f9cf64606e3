//! Backend selection source trait

/// Where the backend name comes from when no explicit override is given
///
/// Implementations:
/// - `EnvConfigSource`: reads `LOKAN_SECRETS_BACKEND`
/// - `MemoryConfigSource`: in-memory for testing
/// - `FileConfigSource`: YAML file (user or workspace level)
/// - `LayeredConfigSource`: first source with a value wins
///
/// Sources are consulted once per selection, never cached by the registry.
pub trait ConfigSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// The configured backend name, or `None` if this source has none
    ///
    /// Empty values count as unset.
    fn backend_name(&self) -> Option<String>;
}

/// Errors that can occur while reading or writing configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Map a blank configured value to `None`; anything else is kept verbatim
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("env".to_string())), Some("env".to_string()));
        assert_eq!(non_empty(Some(" env ".to_string())), Some(" env ".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
