use crate::logging::codes::{self, Code};

/// Errors raised while building a task tree from JSON
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Task file not found: {path}")]
    FileNotFound { path: String },

    #[error("Task document is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Invalid task JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid task shape at '{path}': {message}")]
    InvalidShape { path: String, message: String },

    #[error("Limit '{limit_name}' ({limit}) exceeded at '{path}'")]
    LimitExceeded {
        path: String,
        limit_name: &'static str,
        limit: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn shape(path: &str, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Logging code for this error
    pub fn code(&self) -> Code {
        match self {
            LoadError::FileNotFound { .. } => codes::loading::FILE_NOT_FOUND,
            LoadError::TooLarge { .. } => codes::loading::TASK_TOO_LARGE,
            LoadError::InvalidJson(_) => codes::loading::INVALID_JSON,
            LoadError::InvalidShape { .. } => codes::loading::INVALID_SHAPE,
            LoadError::LimitExceeded { .. } => codes::loading::LIMIT_EXCEEDED,
            LoadError::Io(_) => codes::loading::IO_ERROR,
        }
    }

    /// Dotted JSON path of the offending node, when there is one
    pub fn path(&self) -> Option<&str> {
        match self {
            LoadError::InvalidShape { path, .. } | LoadError::LimitExceeded { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
