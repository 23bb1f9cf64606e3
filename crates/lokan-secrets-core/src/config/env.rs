//! Environment variable selection source

use std::env;

use super::traits::{non_empty, ConfigSource};

/// Default variable naming the active backend
pub const BACKEND_ENV_VAR: &str = "LOKAN_SECRETS_BACKEND";

/// Reads the backend name from an environment variable
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    var: String,
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfigSource {
    /// Read from `LOKAN_SECRETS_BACKEND`
    pub fn new() -> Self {
        Self::with_var(BACKEND_ENV_VAR)
    }

    /// Read from a custom variable
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl ConfigSource for EnvConfigSource {
    fn name(&self) -> &str {
        "env"
    }

    fn backend_name(&self) -> Option<String> {
        non_empty(env::var(&self.var).ok())
    }
}
