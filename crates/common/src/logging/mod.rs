//! Logging subsystem.

pub mod manager;
pub mod types;


// Re-export main types and functions
pub use manager::init;
pub use types::{FileLoggingConfig, LoggerConfig, LoggingError, LoggingResult, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;
