//! Backend selection sources
//!
//! Supports multiple places to name the active backend:
//! - `EnvConfigSource`: `LOKAN_SECRETS_BACKEND` environment variable
//! - `MemoryConfigSource`: In-memory for testing
//! - `FileConfigSource`: YAML file-based (user/workspace level)
//! - `LayeredConfigSource`: priority-ordered fallback across sources

mod traits;
mod env;
mod memory;
mod file;
mod layered;

pub use traits::{ConfigSource, ConfigError, ConfigResult};
pub use env::{EnvConfigSource, BACKEND_ENV_VAR};
pub use memory::MemoryConfigSource;
pub use file::{FileConfigSource, ConfigLevel, SecretsConfigFile};
pub use layered::LayeredConfigSource;
