//! Process-wide accessor over a lazily built [`BackendRegistry`]
//!
//! Prefer owning a `BackendRegistry` and passing it to call sites. These
//! functions exist for callers that need a global entry point; they use the
//! built-in backends and read `LOKAN_SECRETS_BACKEND` at selection time.
//!
//! ```no_run
//! let token = lokan_secrets_core::global::get_secret("SERVICE_API_TOKEN")?;
//! # Ok::<(), lokan_secrets_core::BackendError>(())
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::backends::{BackendKind, BackendRegistry, BackendResult, SecretBackend};

static REGISTRY: Lazy<BackendRegistry> = Lazy::new(BackendRegistry::new);

/// The process-wide registry
pub fn registry() -> &'static BackendRegistry {
    &REGISTRY
}

/// Return the secret identified by `key` from the active backend
pub fn get_secret(key: &str) -> BackendResult<String> {
    REGISTRY.get_secret(key)
}

/// Return the configuration value identified by `key`
pub fn get_config(key: &str) -> BackendResult<String> {
    REGISTRY.get_config(key)
}

/// Force the process to use the backend identified by `name`
pub fn configure_backend(name: &str) -> BackendResult<BackendKind> {
    REGISTRY.reconfigure(name).map(|backend| backend.kind())
}

/// The active backend, selecting one if needed
pub fn current_backend() -> BackendResult<Arc<dyn SecretBackend>> {
    REGISTRY.current()
}

/// List registered backends as `(name, description)`
pub fn list_backends() -> Vec<(String, String)> {
    REGISTRY.list_backends()
}

/// Drop the cached backend to force reselection
///
/// Production code should rely on automatic selection.
#[doc(hidden)]
pub fn reset_backend_for_testing() {
    REGISTRY.reset();
}
