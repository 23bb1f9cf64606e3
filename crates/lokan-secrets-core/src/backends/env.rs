//! Environment variable backend

use std::collections::HashMap;
use std::env;

use super::traits::{BackendKind, BackendResult, MissingReason, Namespace, SecretBackend};

/// Backend that reads secrets and configuration from environment variables
///
/// By default every lookup reads the live process environment. Tests and
/// embedders can supply a fixed mapping with [`EnvBackend::with_vars`]
/// instead.
///
/// Empty values are rejected exactly like unset ones: many deployment
/// environments pass `KEY=` rather than omitting the key.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use lokan_secrets_core::backends::{SecretBackend, EnvBackend};
///
/// let backend = EnvBackend::with_vars(HashMap::from([
///     ("SERVICE_API_TOKEN".to_string(), "token-123".to_string()),
///     ("EMPTY_SECRET".to_string(), String::new()),
/// ]));
///
/// assert_eq!(backend.get_secret("SERVICE_API_TOKEN").unwrap(), "token-123");
/// assert!(backend.get_secret("EMPTY_SECRET").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvBackend {
    vars: Option<HashMap<String, String>>,
}

impl EnvBackend {
    /// Create a backend over the live process environment
    pub fn new() -> Self {
        Self { vars: None }
    }

    /// Create a backend over a fixed mapping
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars: Some(vars) }
    }

    /// Whether this backend reads the process environment
    pub fn is_process_env(&self) -> bool {
        self.vars.is_none()
    }

    fn raw(&self, key: &str) -> Result<String, MissingReason> {
        match &self.vars {
            Some(vars) => vars.get(key).cloned().ok_or(MissingReason::Unset),
            None => env::var(key).map_err(|e| match e {
                env::VarError::NotPresent => MissingReason::Unset,
                env::VarError::NotUnicode(_) => MissingReason::NotUnicode,
            }),
        }
    }

    fn value(&self, namespace: Namespace, key: &str) -> BackendResult<String> {
        match self.raw(key) {
            Ok(value) if value.is_empty() => Err(namespace.not_found(key, MissingReason::Empty)),
            Ok(value) => Ok(value),
            Err(reason) => Err(namespace.not_found(key, reason)),
        }
    }
}

impl SecretBackend for EnvBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Env
    }

    fn get_secret(&self, key: &str) -> BackendResult<String> {
        self.value(Namespace::Secret, key)
    }

    fn get_config(&self, key: &str) -> BackendResult<String> {
        self.value(Namespace::Config, key)
    }
}
