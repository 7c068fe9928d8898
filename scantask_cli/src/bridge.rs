//! Routes logging service events to the selected backend.

use scantask_compiler::logging::{
    ConsoleLogger, LogEvent, LogLevel, Logger, LoggingService, StructuredLogger,
};
use std::sync::Arc;

/// Where log events go
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogBackend {
    /// Plain lines on stderr
    Console,
    /// JSON lines on stderr
    Structured,
    /// The `log` facade, printed by env_logger
    Log,
}

/// Forwards events to the `log` facade
pub struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        log::log!(target: "scantask", to_log_level(event.level), "{}", render(event));
    }
}

pub fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
    }
}

/// Event text without the timestamp and level env_logger already prints
pub fn render(event: &LogEvent) -> String {
    let mut line = format!("[{}] {}", event.code, event.message);
    if !event.context.is_empty() {
        let pairs: Vec<String> = event
            .context
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        line.push_str(&format!(" ({})", pairs.join(", ")));
    }
    line
}

pub fn build_service(backend: LogBackend, min_level: LogLevel) -> LoggingService {
    let logger: Arc<dyn Logger> = match backend {
        LogBackend::Console => Arc::new(ConsoleLogger::new(min_level)),
        LogBackend::Structured => Arc::new(StructuredLogger::new(min_level)),
        LogBackend::Log => Arc::new(LogBridge),
    };
    LoggingService::new(logger, min_level)
}
