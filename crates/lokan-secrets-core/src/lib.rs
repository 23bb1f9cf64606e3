//! Lokan Secrets
//!
//! Secrets and configuration lookup behind a pluggable backend.
//! A [`BackendRegistry`] lazily selects one backend by name (explicit
//! override, then `LOKAN_SECRETS_BACKEND`, then `"env"`), caches it, and
//! serves two namespaces through it: secrets and configuration. Each
//! namespace reports misses with its own error kind.
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use lokan_secrets_core::{BackendError, BackendKind, BackendRegistry, EnvBackend};
//!
//! let mut registry = BackendRegistry::new();
//! registry.register(
//!     BackendKind::Env,
//!     "test mapping",
//!     Box::new(|| Arc::new(EnvBackend::with_vars(HashMap::from([
//!         ("SERVICE_URL".to_string(), "https://example.test".to_string()),
//!     ])))),
//! );
//!
//! assert_eq!(registry.get_config("SERVICE_URL")?, "https://example.test");
//! assert!(matches!(registry.get_secret("SERVICE_URL_TOKEN"), Err(BackendError::SecretNotFound { .. })));
//!
//! registry.reconfigure("sealed-kv")?;
//! assert!(matches!(registry.get_config("SERVICE_URL"), Err(BackendError::NotImplemented { .. })));
//! # Ok::<(), BackendError>(())
//! ```

pub mod backends;
pub mod config;
pub mod logging;
pub mod global;

pub use backends::{
    SecretBackend, BackendKind, Namespace, MissingReason, BackendError, BackendResult,
    EnvBackend, SealedKvBackend,
    BackendRegistry, BackendFactory, DEFAULT_BACKEND,
};

pub use config::{
    ConfigSource, ConfigError, ConfigResult,
    EnvConfigSource, MemoryConfigSource, FileConfigSource, LayeredConfigSource,
};

pub use logging::{Logger, SharedLogger, FileLogger};

/// Serializes unit tests that mutate the process environment
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
