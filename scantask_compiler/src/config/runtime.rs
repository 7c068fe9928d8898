// RUNTIME PREFERENCES (User Experience)

use crate::task::ExceptionPolicy;
use serde::{Deserialize, Serialize};
use std::env;

/// Vendor identity used when nothing else is configured.
pub const DEFAULT_VENDOR_ID: &str = "211a1e90-11e1-11e5-9493-1697f925ec7b";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderPreferences {
    /// Exception policy applied to a root node that declares none
    pub default_exception: ExceptionPolicy,

    /// Whether to accept JSON numbers and booleans as value literals
    pub accept_non_string_literals: bool,
}

impl Default for LoaderPreferences {
    fn default() -> Self {
        Self {
            default_exception: env::var("SCANTASK_LOADER_DEFAULT_EXCEPTION")
                .ok()
                .map(|v| ExceptionPolicy::parse(&v))
                .unwrap_or(ExceptionPolicy::Ignore),
            accept_non_string_literals: env::var("SCANTASK_LOADER_ACCEPT_NON_STRING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePreferences {
    /// Vendor identity the engine resolves as
    pub vendor_id: String,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            vendor_id: env::var("SCANTASK_ENGINE_VENDOR_ID")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VENDOR_ID.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("SCANTASK_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("SCANTASK_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("SCANTASK_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and the CLI)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub loader: LoaderPreferences,
    pub engine: EnginePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Read every preference group from the environment
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Loader
    pub const LOADER_DEFAULT_EXCEPTION: &str = "SCANTASK_LOADER_DEFAULT_EXCEPTION";
    pub const LOADER_ACCEPT_NON_STRING: &str = "SCANTASK_LOADER_ACCEPT_NON_STRING";

    // Engine
    pub const ENGINE_VENDOR_ID: &str = "SCANTASK_ENGINE_VENDOR_ID";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCANTASK_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCANTASK_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCANTASK_LOGGING_MIN_LEVEL";
}
