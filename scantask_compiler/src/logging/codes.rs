//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Integer form carried in error replies
    pub fn as_code(&self) -> i32 {
        *self as i32
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Task loading error codes
pub mod loading {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const TASK_TOO_LARGE: Code = Code::new("E007");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_JSON: Code = Code::new("E020");
    pub const INVALID_SHAPE: Code = Code::new("E021");
    pub const LIMIT_EXCEEDED: Code = Code::new("E022");
}

/// Task resolution codes
pub mod resolution {
    use super::Code;

    pub const MALFORMED_TASK: Code = Code::new("E100");
    pub const UNSUPPORTED_VALUE: Code = Code::new("E110");
    pub const VALUE_IGNORED: Code = Code::new("W120");
    pub const ALTERNATIVE_REQUESTED: Code = Code::new("W130");
}

/// Reply/processing error codes
pub mod processing {
    use super::Code;

    pub const REPLY_SERIALIZATION_ERROR: Code = Code::new("E150");
    pub const CONFIGURATION_ERROR: Code = Code::new("E151");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TASK_LOADED: Code = Code::new("I010");
    pub const TASK_RESOLVED: Code = Code::new("I020");
    pub const DIRECTORY_PROCESSED: Code = Code::new("I030");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
            ErrorMetadata::new(
                "E005",
                "Loading",
                Severity::High,
                true,
                false,
                "Task file not found",
                "Check the task path",
            ),
            ErrorMetadata::new(
                "E007",
                "Loading",
                Severity::High,
                true,
                false,
                "Task document exceeds the configured size limit",
                "Reduce the task or rebuild with a larger max_task_bytes",
            ),
            ErrorMetadata::new(
                "E011",
                "Loading",
                Severity::High,
                true,
                false,
                "I/O error while reading a task",
                "Check file permissions and disk health",
            ),
            ErrorMetadata::new(
                "E020",
                "Loading",
                Severity::High,
                true,
                false,
                "Task document is not valid JSON",
                "Fix the JSON syntax of the task",
            ),
            ErrorMetadata::new(
                "E021",
                "Loading",
                Severity::High,
                true,
                false,
                "Task node has an unexpected shape",
                "Check the reported JSON key against the task format",
            ),
            ErrorMetadata::new(
                "E022",
                "Loading",
                Severity::High,
                true,
                false,
                "Task exceeds a structural limit",
                "Reduce the number of nodes at the reported JSON key",
            ),
            ErrorMetadata::new(
                "E100",
                "Resolution",
                Severity::Critical,
                false,
                true,
                "Task has no actions",
                "Send a task with at least one action",
            ),
            ErrorMetadata::new(
                "E110",
                "Resolution",
                Severity::High,
                false,
                true,
                "Unsupported token under a fail exception policy",
                "Remove the token or relax the exception policy",
            ),
            ErrorMetadata::new(
                "W120",
                "Resolution",
                Severity::Low,
                true,
                false,
                "Unsupported token ignored",
                "No action required",
            ),
            ErrorMetadata::new(
                "W130",
                "Resolution",
                Severity::Low,
                true,
                false,
                "Unsupported token moved resolution to the next stream",
                "No action required",
            ),
            ErrorMetadata::new(
                "E150",
                "Processing",
                Severity::Medium,
                true,
                false,
                "Reply could not be serialized",
                "File bug report with the task that triggered it",
            ),
            ErrorMetadata::new(
                "E151",
                "Processing",
                Severity::Medium,
                true,
                false,
                "Invalid processor configuration",
                "Check the vendor identity and logging options",
            ),
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "No action required",
            ),
            ErrorMetadata::new(
                "I010",
                "Loading",
                Severity::Low,
                true,
                false,
                "Task loaded",
                "No action required",
            ),
            ErrorMetadata::new(
                "I020",
                "Resolution",
                Severity::Low,
                true,
                false,
                "Task resolved",
                "No action required",
            ),
            ErrorMetadata::new(
                "I030",
                "Processing",
                Severity::Low,
                true,
                false,
                "Directory of tasks processed",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_codes_are_registered() {
        assert_eq!(get_severity(resolution::MALFORMED_TASK.as_str()), Severity::Critical);
        assert_eq!(get_severity(resolution::UNSUPPORTED_VALUE.as_str()), Severity::High);
        assert!(requires_halt(resolution::UNSUPPORTED_VALUE.as_str()));
        assert!(!requires_halt(resolution::VALUE_IGNORED.as_str()));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
    }

    #[test]
    fn test_severity_codes() {
        assert_eq!(Severity::Critical.as_code(), 0);
        assert_eq!(Severity::High.as_code(), 1);
        assert_eq!(Severity::Low.as_code(), 3);
    }
}
