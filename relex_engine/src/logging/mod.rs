//! Global logging module for the expression engine
//!
//! Provides thread-safe global logging with console, structured (JSON-line),
//! and in-memory sinks, plus a clean macro interface. Logging is entirely
//! optional: when no global service is installed the macros are no-ops, so
//! library consumers pay nothing unless they opt in.

pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Initialize global logging with a console sink at the given level
pub fn init_global_logging(min_level: LogLevel) -> Result<(), String> {
    let service = Arc::new(LoggingService::new(Arc::new(ConsoleLogger), min_level));
    init_global_logging_with_service(service)
}

/// Initialize with a custom service (primarily for testing and embedding)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to the global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}
