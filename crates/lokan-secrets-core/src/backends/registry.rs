//! Backend registry: selects, caches and delegates to the active backend

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::env::EnvBackend;
use super::sealed_kv::SealedKvBackend;
use super::traits::{BackendError, BackendKind, BackendResult, SecretBackend};
use crate::config::{ConfigSource, EnvConfigSource};
use crate::logging::file_logger as log;
use crate::logging::{FileLogger, SharedLogger};
use crate::{log_info, log_warn};

/// Backend used when neither an override nor the config source names one
pub const DEFAULT_BACKEND: BackendKind = BackendKind::Env;

/// Factory function type for creating backends
pub type BackendFactory = Box<dyn Fn() -> Arc<dyn SecretBackend> + Send + Sync>;

/// Definition of a registered backend
pub struct BackendDefinition {
    pub kind: BackendKind,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: BackendFactory,
}

impl std::fmt::Debug for BackendDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDefinition")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish()
    }
}

struct ActiveBackend {
    kind: BackendKind,
    backend: Arc<dyn SecretBackend>,
}

/// Lookup facade over a single lazily selected backend
///
/// The registry owns a table of backend factories, the source consulted
/// for the backend name, and one cached backend slot. The slot is filled on
/// first lookup (or explicit selection) and reused until [`reconfigure`] or
/// [`reset`].
///
/// Concurrent [`reconfigure`] calls are last-writer-wins.
///
/// [`reconfigure`]: BackendRegistry::reconfigure
/// [`reset`]: BackendRegistry::reset
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use lokan_secrets_core::backends::{BackendKind, BackendRegistry, EnvBackend};
///
/// let mut registry = BackendRegistry::new();
/// registry.register(
///     BackendKind::Env,
///     "Fixed test mapping",
///     Box::new(|| Arc::new(EnvBackend::with_vars(HashMap::from([
///         ("SERVICE_API_TOKEN".to_string(), "token-123".to_string()),
///     ])))),
/// );
///
/// assert_eq!(registry.get_secret("SERVICE_API_TOKEN").unwrap(), "token-123");
/// ```
pub struct BackendRegistry {
    definitions: HashMap<BackendKind, BackendDefinition>,
    config: Arc<dyn ConfigSource>,
    logger: SharedLogger,
    active: RwLock<Option<ActiveBackend>>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendRegistry {
    /// Create a registry with the built-in backends, reading the backend
    /// name from `LOKAN_SECRETS_BACKEND`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            BackendKind::Env,
            "Read secrets and configuration from environment variables",
            Box::new(|| Arc::new(EnvBackend::new())),
        );
        registry.register(
            BackendKind::SealedKv,
            "Sealed key-value store (not available yet)",
            Box::new(|| Arc::new(SealedKvBackend::new())),
        );
        registry
    }

    /// Create a registry with no backends registered
    pub fn empty() -> Self {
        Self {
            definitions: HashMap::new(),
            config: Arc::new(EnvConfigSource::new()),
            logger: Arc::new(FileLogger::new("BackendRegistry")),
            active: RwLock::new(None),
        }
    }

    /// Replace the source consulted for the backend name
    pub fn with_config_source(mut self, config: Arc<dyn ConfigSource>) -> Self {
        self.config = config;
        self
    }

    /// Replace the logger used for selection events
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Register (or replace) the factory for `kind`
    ///
    /// Does not touch the cached backend; call [`reconfigure`](Self::reconfigure)
    /// to pick up a replaced factory.
    pub fn register(&mut self, kind: BackendKind, description: &str, factory: BackendFactory) {
        self.definitions.insert(
            kind,
            BackendDefinition {
                kind,
                description: description.to_string(),
                factory,
            },
        );
    }

    /// Check if a backend kind is registered
    pub fn has_backend(&self, kind: BackendKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    /// List registered backends as `(name, description)`, sorted by name
    pub fn list_backends(&self) -> Vec<(String, String)> {
        let mut backends: Vec<_> = self
            .definitions
            .values()
            .map(|def| (def.kind.as_str().to_string(), def.description.clone()))
            .collect();
        backends.sort();
        backends
    }

    /// Resolve the effective backend name: explicit override, else the
    /// config source, else `"env"`
    fn resolve_name(&self, name: Option<&str>) -> String {
        name.filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.config.backend_name())
            .unwrap_or_else(|| DEFAULT_BACKEND.as_str().to_string())
    }

    fn resolve_kind(&self, name: Option<&str>) -> BackendResult<BackendKind> {
        let name = self.resolve_name(name);
        let kind: BackendKind = name.parse()?;
        if !self.has_backend(kind) {
            return Err(BackendError::UnsupportedBackend(name));
        }
        Ok(kind)
    }

    /// Check that the configured backend resolves to a registered kind,
    /// without instantiating it
    pub fn validate(&self) -> BackendResult<BackendKind> {
        self.resolve_kind(None)
    }

    fn instantiate(&self, kind: BackendKind) -> BackendResult<ActiveBackend> {
        let def = self
            .definitions
            .get(&kind)
            .ok_or_else(|| BackendError::UnsupportedBackend(kind.as_str().to_string()))?;
        Ok(ActiveBackend {
            kind,
            backend: (def.factory)(),
        })
    }

    /// Select, instantiate and cache a backend
    ///
    /// `None` falls back to the config source, then to `"env"`. An unknown
    /// or unregistered name fails with [`BackendError::UnsupportedBackend`]
    /// and leaves any cached backend in place.
    pub fn select(&self, name: Option<&str>) -> BackendResult<Arc<dyn SecretBackend>> {
        let kind = self.resolve_kind(name).inspect_err(|e| {
            log_warn!(self.logger, "Backend selection failed: {}", e);
        })?;
        self.select_kind(kind)
    }

    /// Select, instantiate and cache the backend for `kind`
    pub fn select_kind(&self, kind: BackendKind) -> BackendResult<Arc<dyn SecretBackend>> {
        let active = self.instantiate(kind)?;
        let backend = Arc::clone(&active.backend);

        let previous = self.active.write().replace(active);
        match previous {
            Some(prev) => log_info!(self.logger, "Switched secrets backend {} -> {}", prev.kind, kind),
            None => log_info!(self.logger, "Selected secrets backend {}", kind),
        }
        Ok(backend)
    }

    /// Return the cached backend, selecting one if none is cached
    pub fn current(&self) -> BackendResult<Arc<dyn SecretBackend>> {
        if let Some(active) = self.active.read().as_ref() {
            return Ok(Arc::clone(&active.backend));
        }

        let mut slot = self.active.write();
        // Another caller may have initialized it while we waited
        if let Some(active) = slot.as_ref() {
            return Ok(Arc::clone(&active.backend));
        }

        let kind = self.resolve_kind(None).inspect_err(|e| {
            log_warn!(self.logger, "Backend selection failed: {}", e);
        })?;
        let active = self.instantiate(kind)?;
        let backend = Arc::clone(&active.backend);
        *slot = Some(active);
        log_info!(self.logger, "Selected secrets backend {}", kind);
        Ok(backend)
    }

    /// Kind of the cached backend, if one is cached
    pub fn active_kind(&self) -> Option<BackendKind> {
        self.active.read().as_ref().map(|a| a.kind)
    }

    /// Return the secret identified by `key` from the active backend
    pub fn get_secret(&self, key: &str) -> BackendResult<String> {
        self.current()?.get_secret(key).inspect_err(|e| {
            log::debug("BackendRegistry", &format!("get_secret('{}') failed: {}", key, e));
        })
    }

    /// Return the configuration value identified by `key` from the active backend
    pub fn get_config(&self, key: &str) -> BackendResult<String> {
        self.current()?.get_config(key).inspect_err(|e| {
            log::debug("BackendRegistry", &format!("get_config('{}') failed: {}", key, e));
        })
    }

    /// Force selection of `name`, discarding any cached backend
    pub fn reconfigure(&self, name: &str) -> BackendResult<Arc<dyn SecretBackend>> {
        self.select(Some(name))
    }

    /// Drop the cached backend so the next lookup selects again
    ///
    /// Intended for tests.
    pub fn reset(&self) {
        if let Some(prev) = self.active.write().take() {
            log_info!(self.logger, "Reset secrets backend {}", prev.kind);
        }
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.definitions.keys().collect::<Vec<_>>())
            .field("config", &self.config.name())
            .field("active", &self.active_kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MissingReason;
    use crate::config::MemoryConfigSource;
    use crate::logging::Logger;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn debug(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("debug: {}", message));
        }
        fn info(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("info: {}", message));
        }
        fn warn(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("warn: {}", message));
        }
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("error: {}", message));
        }
    }

    fn registry_with(vars: &[(&str, &str)], config: Arc<MemoryConfigSource>) -> BackendRegistry {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut registry = BackendRegistry::new().with_config_source(config);
        registry.register(
            BackendKind::Env,
            "test mapping",
            Box::new(move || Arc::new(EnvBackend::with_vars(vars.clone()))),
        );
        registry
    }

    fn same(a: &Arc<dyn SecretBackend>, b: &Arc<dyn SecretBackend>) -> bool {
        Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
    }

    #[test]
    fn test_builtin_backends_registered() {
        let registry = BackendRegistry::new();
        assert!(registry.has_backend(BackendKind::Env));
        assert!(registry.has_backend(BackendKind::SealedKv));

        let names: Vec<_> = registry.list_backends().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["env".to_string(), "sealed-kv".to_string()]);
    }

    #[test]
    fn test_lazy_default_selection() {
        let registry = registry_with(&[("SERVICE_API_TOKEN", "token-123")], Arc::new(MemoryConfigSource::new()));
        assert_eq!(registry.active_kind(), None);

        assert_eq!(registry.get_secret("SERVICE_API_TOKEN").unwrap(), "token-123");
        assert_eq!(registry.active_kind(), Some(BackendKind::Env));
    }

    #[test]
    fn test_lookup_errors_pass_through() {
        let registry = registry_with(&[("EMPTY_SECRET", "")], Arc::new(MemoryConfigSource::new()));

        assert_eq!(
            registry.get_secret("MISSING_SECRET"),
            Err(BackendError::SecretNotFound {
                key: "MISSING_SECRET".to_string(),
                reason: MissingReason::Unset,
            })
        );
        assert!(matches!(
            registry.get_secret("EMPTY_SECRET"),
            Err(BackendError::SecretNotFound { reason: MissingReason::Empty, .. })
        ));
        assert!(matches!(
            registry.get_config("MISSING_CONFIG"),
            Err(BackendError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_config_source_selects_backend() {
        let config = Arc::new(MemoryConfigSource::with_backend("sealed-kv"));
        let registry = registry_with(&[("KEY", "value")], config);

        assert_eq!(
            registry.get_config("KEY"),
            Err(BackendError::NotImplemented { backend: BackendKind::SealedKv })
        );
        assert_eq!(registry.active_kind(), Some(BackendKind::SealedKv));
    }

    #[test]
    fn test_explicit_name_overrides_config() {
        let config = Arc::new(MemoryConfigSource::with_backend("sealed-kv"));
        let registry = registry_with(&[("KEY", "value")], config);

        let backend = registry.select(Some("env")).unwrap();
        assert_eq!(backend.kind(), BackendKind::Env);
        assert_eq!(registry.get_config("KEY").unwrap(), "value");

        // Blank override falls back to the config source
        assert_eq!(registry.select(Some(" ")).unwrap().kind(), BackendKind::SealedKv);
    }

    #[test]
    fn test_names_must_match_exactly() {
        let registry = registry_with(&[], Arc::new(MemoryConfigSource::new()));

        for name in ["ENV", "Sealed-KV", " env "] {
            assert_eq!(
                registry.select(Some(name)).err(),
                Some(BackendError::UnsupportedBackend(name.to_string()))
            );
        }
        assert_eq!(registry.active_kind(), None);

        let config = Arc::new(MemoryConfigSource::with_backend("Env"));
        let registry = registry_with(&[], config);
        assert_eq!(registry.validate(), Err(BackendError::UnsupportedBackend("Env".to_string())));
    }

    #[test]
    fn test_select_kind() {
        let config = Arc::new(MemoryConfigSource::with_backend("env"));
        let registry = registry_with(&[("KEY", "value")], config);

        // Typed selection ignores the config source
        let backend = registry.select_kind(BackendKind::SealedKv).unwrap();
        assert_eq!(backend.kind(), BackendKind::SealedKv);
        assert!(same(&backend, &registry.current().unwrap()));
        assert!(matches!(registry.get_secret("KEY"), Err(BackendError::NotImplemented { .. })));

        let empty = BackendRegistry::empty().with_config_source(Arc::new(MemoryConfigSource::new()));
        assert_eq!(
            empty.select_kind(BackendKind::Env).err(),
            Some(BackendError::UnsupportedBackend("env".to_string()))
        );
        assert_eq!(empty.active_kind(), None);
    }

    #[test]
    fn test_current_is_identity_stable() {
        let registry = registry_with(&[], Arc::new(MemoryConfigSource::new()));

        let first = registry.current().unwrap();
        let second = registry.current().unwrap();
        assert!(same(&first, &second));
    }

    #[test]
    fn test_reconfigure_switches_backend() {
        let registry = registry_with(&[("KEY", "value")], Arc::new(MemoryConfigSource::new()));
        let before = registry.current().unwrap();
        assert_eq!(registry.get_secret("KEY").unwrap(), "value");

        registry.reconfigure("sealed-kv").unwrap();
        assert_eq!(registry.active_kind(), Some(BackendKind::SealedKv));
        assert!(matches!(registry.get_secret("KEY"), Err(BackendError::NotImplemented { .. })));

        // Reconfiguring to the same kind still yields a fresh instance
        registry.reconfigure("env").unwrap();
        let after = registry.current().unwrap();
        assert!(!same(&before, &after));
        assert_eq!(registry.get_secret("KEY").unwrap(), "value");
    }

    #[test]
    fn test_unsupported_backend() {
        let registry = registry_with(&[], Arc::new(MemoryConfigSource::new()));

        assert_eq!(
            registry.select(Some("vault")).err(),
            Some(BackendError::UnsupportedBackend("vault".to_string()))
        );
        assert_eq!(registry.active_kind(), None);

        // Failed selection leaves the cached backend alone
        let current = registry.current().unwrap();
        assert!(matches!(registry.reconfigure("vault"), Err(BackendError::UnsupportedBackend(_))));
        assert!(same(&current, &registry.current().unwrap()));
    }

    #[test]
    fn test_unregistered_kind_is_unsupported() {
        let registry = BackendRegistry::empty().with_config_source(Arc::new(MemoryConfigSource::new()));

        assert_eq!(
            registry.get_secret("ANY"),
            Err(BackendError::UnsupportedBackend("env".to_string()))
        );
        assert!(registry.validate().is_err());
    }

    #[test]
    fn test_unknown_configured_name() {
        let config = Arc::new(MemoryConfigSource::with_backend("vault"));
        let registry = registry_with(&[], config.clone());

        assert_eq!(registry.validate(), Err(BackendError::UnsupportedBackend("vault".to_string())));
        assert!(matches!(registry.current(), Err(BackendError::UnsupportedBackend(_))));

        config.set_backend("env");
        assert_eq!(registry.validate(), Ok(BackendKind::Env));
        assert_eq!(registry.active_kind(), None);
    }

    #[test]
    fn test_reset() {
        let config = Arc::new(MemoryConfigSource::new());
        let registry = registry_with(&[], config.clone());

        registry.current().unwrap();
        assert_eq!(registry.active_kind(), Some(BackendKind::Env));

        registry.reset();
        assert_eq!(registry.active_kind(), None);

        // Config is consulted again after a reset
        config.set_backend("sealed-kv");
        assert_eq!(registry.current().unwrap().kind(), BackendKind::SealedKv);
    }

    #[test]
    fn test_selection_is_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let registry = registry_with(&[], Arc::new(MemoryConfigSource::new())).with_logger(logger.clone());

        registry.current().unwrap();
        registry.reconfigure("sealed-kv").unwrap();
        let _ = registry.reconfigure("vault");
        registry.reset();

        assert_eq!(
            logger.messages(),
            vec![
                "info: Selected secrets backend env".to_string(),
                "info: Switched secrets backend env -> sealed-kv".to_string(),
                "warn: Backend selection failed: Unsupported secrets backend 'vault'".to_string(),
                "info: Reset secrets backend sealed-kv".to_string(),
            ]
        );
    }

    #[test]
    fn test_concurrent_first_lookup_shares_instance() {
        use std::thread;

        let registry = Arc::new(registry_with(&[("KEY", "value")], Arc::new(MemoryConfigSource::new())));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.current().unwrap())
            })
            .collect();

        let backends: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for backend in &backends[1..] {
            assert!(same(&backends[0], backend));
        }
    }
}
