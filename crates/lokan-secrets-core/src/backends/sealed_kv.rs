//! Placeholder for the sealed key-value store backend

use super::traits::{BackendError, BackendKind, BackendResult, SecretBackend};

/// Backend that will eventually talk to the sealed KV store
///
/// Registered so `sealed-kv` is a valid selection; every lookup fails with
/// [`BackendError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SealedKvBackend;

impl SealedKvBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SecretBackend for SealedKvBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::SealedKv
    }

    fn get_secret(&self, _key: &str) -> BackendResult<String> {
        Err(BackendError::NotImplemented { backend: self.kind() })
    }

    fn get_config(&self, _key: &str) -> BackendResult<String> {
        Err(BackendError::NotImplemented { backend: self.kind() })
    }
}
