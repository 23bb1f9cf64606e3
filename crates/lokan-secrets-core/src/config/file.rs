//! File-based selection source (YAML)
//!
//! Supports user-level (~/.config/lokan/secrets.yaml) and workspace-level
//! (.config/lokan/secrets.yaml) files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::traits::{non_empty, ConfigError, ConfigResult, ConfigSource};
use crate::logging::file_logger as log;

/// Secrets configuration file structure
///
/// ```yaml
/// backend: sealed-kv
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SecretsConfigFile {
    /// Name of the backend to select
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/lokan/secrets.yaml)
    User,
    /// Workspace-level config (.config/lokan/secrets.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// File-based selection source
///
/// The file is read on every selection; there is no cache to invalidate.
///
/// # Example
///
/// ```no_run
/// use lokan_secrets_core::config::FileConfigSource;
///
/// // User-level config
/// let user_config = FileConfigSource::user();
///
/// // Workspace-level config
/// let workspace_config = FileConfigSource::workspace("/path/to/workspace");
/// ```
pub struct FileConfigSource {
    path: PathBuf,
    level: ConfigLevel,
}

impl FileConfigSource {
    /// Create a new file source for a specific path
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// Create a user-level source (~/.config/lokan/secrets.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        let path = config_dir.join("lokan").join("secrets.yaml");
        Self::new(path, ConfigLevel::User)
    }

    /// Create a workspace-level source (.config/lokan/secrets.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("lokan").join("secrets.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the file, or an empty config if it does not exist
    pub fn load(&self) -> ConfigResult<SecretsConfigFile> {
        if !self.path.exists() {
            return Ok(SecretsConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SecretsConfigFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write the file, creating parent directories as needed
    pub fn save(&self, config: &SecretsConfigFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Set the configured backend name and save
    pub fn set_backend(&self, backend: &str) -> ConfigResult<()> {
        if backend.trim().is_empty() {
            return Err(ConfigError::Other("backend name must not be empty".to_string()));
        }
        let mut config = self.load()?;
        config.backend = Some(backend.to_string());
        self.save(&config)
    }
}

impl std::fmt::Debug for FileConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigSource")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigSource for FileConfigSource {
    fn name(&self) -> &str {
        self.level.as_str()
    }

    fn backend_name(&self) -> Option<String> {
        match self.load() {
            Ok(config) => non_empty(config.backend),
            Err(e) => {
                log::warn(
                    "FileConfigSource",
                    &format!("Ignoring unreadable {}: {}", self.path.display(), e),
                );
                None
            }
        }
    }
}
