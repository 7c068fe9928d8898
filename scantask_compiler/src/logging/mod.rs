//! Global logging module for scan task processing
//!
//! Provides thread-safe global logging with code-classified events and a
//! clean macro interface. Until `init_global_logging_with_service` runs, every macro is a
//! no-op, so library code can log unconditionally.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the global service (the CLI picks the backend)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::error(code, message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::success(code, message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::info(message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}
