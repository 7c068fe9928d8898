//! Type-safe logging macros using Code types with Display support

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING MACROS
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO LOGGING MACROS
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

// ============================================================================
// WARNING LOGGING MACROS
// ============================================================================

/// Log warning message, optionally with a code - accepts Display types for context values
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                let mut event = $crate::logging::LogEvent::warning_with_code($code, $message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )+
                logger.log_event(event);
            }
        }
    };

    ($message:expr) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event($crate::logging::LogEvent::warning($message));
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                let mut event = $crate::logging::LogEvent::warning($message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )+
                logger.log_event(event);
            }
        }
    };
}

// ============================================================================
// DEBUG LOGGING MACROS
// ============================================================================

/// Log debug message - accepts Display types for context values
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                if logger.should_log($crate::logging::LogLevel::Debug) {
                    logger.log_event($crate::logging::LogEvent::debug($message));
                }
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                if logger.should_log($crate::logging::LogLevel::Debug) {
                    let mut event = $crate::logging::LogEvent::debug($message);
                    $(
                        event = event.with_context($key, &format!("{}", $value));
                    )+
                    logger.log_event(event);
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macro_forms_expand() {
        let path = "actions[0].streams[0]";

        log_error!(codes::resolution::UNSUPPORTED_VALUE, "Unsupported value",
            "path" => path,
            "literal" => "maybe"
        );
        log_success!(codes::success::TASK_RESOLVED, "Task resolved", "actions" => 2);
        log_info!("Resolving task", "vendor" => "acme");
        log_warning!(code = codes::resolution::VALUE_IGNORED, "Ignored", "path" => path);
        log_warning!("Plain warning");
        log_debug!("Trying source", "index" => 0usize);
    }
}
