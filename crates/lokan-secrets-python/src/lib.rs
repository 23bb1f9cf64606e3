//! Python bindings for lokan-secrets via PyO3
//!
//! Exposes the process-wide facade as the `lokan_secrets` module:
//!
//! ```python
//! import lokan_secrets
//!
//! token = lokan_secrets.get_secret("SERVICE_API_TOKEN")
//! lokan_secrets.configure_backend("sealed-kv")
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use pyo3::create_exception;
use pyo3::exceptions::{PyKeyError, PyNotImplementedError, PyValueError};
use pyo3::prelude::*;

use lokan_secrets_core::backends::{
    BackendError, EnvBackend as CoreEnvBackend, SealedKvBackend as CoreSealedKvBackend,
    SecretBackend as CoreSecretBackend,
};
use lokan_secrets_core::global;

// ============================================================================
// Exceptions
// ============================================================================

create_exception!(lokan_secrets, SecretError, PyKeyError, "Base exception for secret backend errors.");
create_exception!(lokan_secrets, SecretNotFoundError, SecretError, "Raised when a requested secret is not available.");
create_exception!(lokan_secrets, ConfigNotFoundError, SecretError, "Raised when a requested configuration value is not available.");
create_exception!(lokan_secrets, UnsupportedBackendError, PyValueError, "Raised when the selected backend is not registered.");

fn to_py_err(err: BackendError) -> PyErr {
    let message = err.to_string();
    match err {
        BackendError::SecretNotFound { .. } => SecretNotFoundError::new_err(message),
        BackendError::ConfigNotFound { .. } => ConfigNotFoundError::new_err(message),
        BackendError::UnsupportedBackend(_) => UnsupportedBackendError::new_err(message),
        BackendError::NotImplemented { .. } => PyNotImplementedError::new_err(message),
    }
}

// ============================================================================
// Backends
// ============================================================================

#[pyclass]
pub struct BackendInfo {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub description: String,
}

#[pymethods]
impl BackendInfo {
    fn __repr__(&self) -> String {
        format!("BackendInfo(name='{}', description='{}')", self.name, self.description)
    }
}

/// Backend that reads values from environment variables, or from `env` if given
#[pyclass]
pub struct EnvBackend {
    inner: Arc<CoreEnvBackend>,
}

#[pymethods]
impl EnvBackend {
    #[new]
    #[pyo3(signature = (env=None))]
    pub fn new(env: Option<HashMap<String, String>>) -> Self {
        let inner = match env {
            Some(vars) => CoreEnvBackend::with_vars(vars),
            None => CoreEnvBackend::new(),
        };
        Self { inner: Arc::new(inner) }
    }

    pub fn get_secret(&self, key: &str) -> PyResult<String> {
        self.inner.get_secret(key).map_err(to_py_err)
    }

    pub fn get_config(&self, key: &str) -> PyResult<String> {
        self.inner.get_config(key).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!("EnvBackend(process_env={})", self.inner.is_process_env())
    }
}

/// Placeholder backend for the sealed KV store
#[pyclass(name = "SealedKVBackend")]
pub struct SealedKvBackend {
    inner: CoreSealedKvBackend,
}

#[pymethods]
impl SealedKvBackend {
    #[new]
    pub fn new() -> Self {
        Self { inner: CoreSealedKvBackend::new() }
    }

    pub fn get_secret(&self, key: &str) -> PyResult<String> {
        self.inner.get_secret(key).map_err(to_py_err)
    }

    pub fn get_config(&self, key: &str) -> PyResult<String> {
        self.inner.get_config(key).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        "SealedKVBackend()".to_string()
    }
}

// ============================================================================
// Module Functions
// ============================================================================

/// Return the secret identified by `key` from the active backend
#[pyfunction]
pub fn get_secret(key: &str) -> PyResult<String> {
    global::get_secret(key).map_err(to_py_err)
}

/// Return the configuration value identified by `key`
#[pyfunction]
pub fn get_config(key: &str) -> PyResult<String> {
    global::get_config(key).map_err(to_py_err)
}

/// Force the module to use the backend identified by `name`
#[pyfunction]
pub fn configure_backend(name: &str) -> PyResult<()> {
    global::configure_backend(name).map(|_| ()).map_err(to_py_err)
}

#[pyfunction]
pub fn list_backends() -> Vec<BackendInfo> {
    global::list_backends()
        .into_iter()
        .map(|(name, description)| BackendInfo { name, description })
        .collect()
}

#[pyfunction]
fn _reset_backend_for_testing() {
    global::reset_backend_for_testing();
}

// ============================================================================
// Module Definition
// ============================================================================

#[pymodule]
fn lokan_secrets(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    // Exceptions
    m.add("SecretError", py.get_type::<SecretError>())?;
    m.add("SecretNotFoundError", py.get_type::<SecretNotFoundError>())?;
    m.add("ConfigNotFoundError", py.get_type::<ConfigNotFoundError>())?;
    m.add("UnsupportedBackendError", py.get_type::<UnsupportedBackendError>())?;

    // Backend Types
    m.add_class::<BackendInfo>()?;
    m.add_class::<EnvBackend>()?;
    m.add_class::<SealedKvBackend>()?;

    // Functions
    m.add_function(wrap_pyfunction!(get_secret, m)?)?;
    m.add_function(wrap_pyfunction!(get_config, m)?)?;
    m.add_function(wrap_pyfunction!(configure_backend, m)?)?;
    m.add_function(wrap_pyfunction!(list_backends, m)?)?;
    m.add_function(wrap_pyfunction!(_reset_backend_for_testing, m)?)?;

    Ok(())
}
