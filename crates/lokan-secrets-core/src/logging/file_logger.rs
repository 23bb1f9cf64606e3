//! File-based debug logger for troubleshooting
//!
//! Writes to `<tmp>/lokan-secrets-debug.log` when `LOKAN_SECRETS_DEBUG` is
//! set to `1` or `true`. Useful inside hosts (Python services, daemons) whose
//! stderr is not visible. Secret values are never passed to this logger.
//! While disabled, nothing is created on disk.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::SystemTime;

use super::traits::Logger;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
}

impl FileLoggerState {
    fn from_env() -> Self {
        let enabled = std::env::var("LOKAN_SECRETS_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let min_level = std::env::var("LOKAN_SECRETS_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        Self::open(&log_file_path(), enabled, min_level)
    }

    /// `file` stays `None` (and the path untouched) unless enabled
    fn open(path: &Path, enabled: bool, min_level: LogLevel) -> Self {
        let file = if enabled {
            OpenOptions::new().create(true).append(true).open(path).ok()
        } else {
            None
        };
        Self { file, min_level }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| {
                let secs = d.as_secs();
                format!(
                    "{:02}:{:02}:{:02}.{:03}",
                    (secs % 86400) / 3600,
                    (secs % 3600) / 60,
                    secs % 60,
                    d.subsec_millis()
                )
            })
            .unwrap_or_else(|_| "??:??:??.???".to_string());

        let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
        let _ = file.flush();
    }
}

static LOGGER: OnceLock<Mutex<FileLoggerState>> = OnceLock::new();

fn get_logger() -> &'static Mutex<FileLoggerState> {
    LOGGER.get_or_init(|| Mutex::new(FileLoggerState::from_env()))
}

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.write(level, module, message);
    }
}

pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Path of the debug log file
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("lokan-secrets-debug.log")
}

/// [`Logger`] that writes into the debug log file under a fixed module tag
///
/// Default logger of [`BackendRegistry`](crate::backends::BackendRegistry).
#[derive(Debug, Clone)]
pub struct FileLogger {
    module: String,
}

impl FileLogger {
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into() }
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        log(LogLevel::Debug, &self.module, message);
    }

    fn info(&self, message: &str) {
        log(LogLevel::Info, &self.module, message);
    }

    fn warn(&self, message: &str) {
        log(LogLevel::Warn, &self.module, message);
    }

    fn error(&self, message: &str) {
        log(LogLevel::Error, &self.module, message);
    }
}
