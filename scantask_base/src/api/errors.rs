//! # Processor Errors

use crate::resolution::error::ResolutionError;
use scantask_compiler::loader::LoadError;
use scantask_compiler::logging::{codes, Code};

/// Error type for the task processor facade
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// Error while building the task tree
    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    /// Error from resolution engine
    #[error("Resolution error: {0}")]
    ResolutionError(#[from] ResolutionError),

    /// Reply could not be serialized
    #[error("Reply serialization error: {0}")]
    ReplyError(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProcessorError {
    /// Logging code for this failure
    pub fn code(&self) -> Code {
        match self {
            ProcessorError::LoadError(e) => e.code(),
            ProcessorError::ResolutionError(e) => e.code(),
            ProcessorError::ReplyError(_) => codes::processing::REPLY_SERIALIZATION_ERROR,
            ProcessorError::FileNotFound { .. } => codes::loading::FILE_NOT_FOUND,
            ProcessorError::ConfigurationError { .. } => codes::processing::CONFIGURATION_ERROR,
            ProcessorError::IoError(_) => codes::loading::IO_ERROR,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ProcessorError::LoadError(e) => match e.path() {
                Some(path) if !path.is_empty() => format!("Task could not be loaded at {}: {}", path, e),
                _ => format!("Task could not be loaded: {}", e),
            },
            ProcessorError::ResolutionError(e) => format!("Resolution failed: {}", e),
            ProcessorError::ReplyError(e) => format!("Reply could not be written: {}", e),
            ProcessorError::FileNotFound { path } => {
                format!("File not found: {}", path)
            }
            ProcessorError::ConfigurationError { reason } => {
                format!("Configuration error: {}", reason)
            }
            ProcessorError::IoError(e) => format!("I/O error: {}", e),
        }
    }
}
