//! Secret backend abstractions and implementations
//!
//! This module provides a pluggable backend system with:
//! - `SecretBackend` trait serving the secret and config namespaces
//! - Built-in implementations: `EnvBackend`, `SealedKvBackend`
//! - `BackendRegistry`, which selects, caches and delegates to one backend

mod traits;
mod env;
mod sealed_kv;
mod registry;

pub use traits::{SecretBackend, BackendKind, Namespace, MissingReason, BackendError, BackendResult};
pub use env::EnvBackend;
pub use sealed_kv::SealedKvBackend;
pub use registry::{BackendRegistry, BackendDefinition, BackendFactory, DEFAULT_BACKEND};
