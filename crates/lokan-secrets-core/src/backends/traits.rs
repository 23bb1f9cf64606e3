//! Core traits and types for secret backends

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifies a backend implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    /// Process environment (or an explicit key/value mapping)
    Env,
    /// Sealed key-value store (not available yet)
    SealedKv,
}

impl BackendKind {
    /// Every known backend kind
    pub const ALL: [BackendKind; 2] = [BackendKind::Env, BackendKind::SealedKv];

    /// Canonical backend name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Env => "env",
            BackendKind::SealedKv => "sealed-kv",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "env" => Ok(BackendKind::Env),
            "sealed-kv" => Ok(BackendKind::SealedKv),
            _ => Err(BackendError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// The two lookup namespaces a backend serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Secret,
    Config,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Secret => "secret",
            Namespace::Config => "config",
        }
    }

    /// Build this namespace's not-found error
    pub fn not_found(self, key: impl Into<String>, reason: MissingReason) -> BackendError {
        let key = key.into();
        match self {
            Namespace::Secret => BackendError::SecretNotFound { key, reason },
            Namespace::Config => BackendError::ConfigNotFound { key, reason },
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a lookup produced no usable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// The key does not exist
    Unset,
    /// The key exists but holds an empty string
    Empty,
    /// The key exists but its value is not valid UTF-8
    NotUnicode,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::Unset => write!(f, "is not set"),
            MissingReason::Empty => write!(f, "is set but empty"),
            MissingReason::NotUnicode => write!(f, "is set but not valid unicode"),
        }
    }
}

/// Errors that can occur during backend selection and lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Secret not found: {key} {reason}")]
    SecretNotFound { key: String, reason: MissingReason },

    #[error("Config not found: {key} {reason}")]
    ConfigNotFound { key: String, reason: MissingReason },

    #[error("Unsupported secrets backend '{0}'")]
    UnsupportedBackend(String),

    #[error("The {backend} backend is not available yet")]
    NotImplemented { backend: BackendKind },
}

impl BackendError {
    /// Namespace of a not-found error
    pub fn namespace(&self) -> Option<Namespace> {
        match self {
            BackendError::SecretNotFound { .. } => Some(Namespace::Secret),
            BackendError::ConfigNotFound { .. } => Some(Namespace::Config),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.namespace().is_some()
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Trait for secret and configuration backends
///
/// Secrets and configuration are separate namespaces served by the same
/// backend. Implementations return [`BackendError::SecretNotFound`] or
/// [`BackendError::ConfigNotFound`] when a key is unknown or has no value.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use lokan_secrets_core::backends::{SecretBackend, EnvBackend};
///
/// let backend = EnvBackend::with_vars(HashMap::from([
///     ("SERVICE_URL".to_string(), "https://example.test".to_string()),
/// ]));
/// assert_eq!(backend.get_config("SERVICE_URL").unwrap(), "https://example.test");
/// ```
pub trait SecretBackend: Send + Sync {
    /// Which kind of backend this is
    fn kind(&self) -> BackendKind;

    /// Return the secret associated with `key`
    fn get_secret(&self, key: &str) -> BackendResult<String>;

    /// Return the configuration value associated with `key`
    fn get_config(&self, key: &str) -> BackendResult<String>;

    /// Look up `key` in the given namespace
    fn lookup(&self, namespace: Namespace, key: &str) -> BackendResult<String> {
        match namespace {
            Namespace::Secret => self.get_secret(key),
            Namespace::Config => self.get_config(key),
        }
    }
}
