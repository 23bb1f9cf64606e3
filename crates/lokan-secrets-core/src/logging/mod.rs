//! Logging for backend selection and lookups

mod traits;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use file_logger::{FileLogger, LogLevel, log_file_path};
