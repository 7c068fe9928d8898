use scantask_compiler::logging::codes::{self, Code, Severity};
use serde::Serialize;

/// Tree level an unrecognized token was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Action,
    Source,
    PixelFormat,
    Attribute,
    Value,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Source => "source",
            Self::PixelFormat => "pixelFormat",
            Self::Attribute => "attribute",
            Self::Value => "value",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fatal resolution failures. Any of these aborts the whole task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Absent task or empty action list
    #[error("Malformed task: {message}")]
    MalformedInput { message: String, path: String },

    /// Unrecognized token under a `fail` policy
    #[error("Unsupported {kind} '{literal}' for '{name}' at '{path}'")]
    UnsupportedValue {
        kind: NodeKind,
        name: String,
        path: String,
        literal: String,
    },
}

impl ResolutionError {
    pub fn malformed(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn unsupported(
        kind: NodeKind,
        name: impl Into<String>,
        path: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        Self::UnsupportedValue {
            kind,
            name: name.into(),
            path: path.into(),
            literal: literal.into(),
        }
    }

    pub fn code(&self) -> Code {
        match self {
            Self::MalformedInput { .. } => codes::resolution::MALFORMED_TASK,
            Self::UnsupportedValue { .. } => codes::resolution::UNSUPPORTED_VALUE,
        }
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.code().as_str())
    }

    /// Integer severity carried in error replies
    pub fn severity_code(&self) -> i32 {
        self.severity().as_code()
    }

    /// Dotted path of the offending node
    pub fn path(&self) -> &str {
        match self {
            Self::MalformedInput { path, .. } | Self::UnsupportedValue { path, .. } => path,
        }
    }

    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::MalformedInput { .. } => None,
            Self::UnsupportedValue { literal, .. } => Some(literal),
        }
    }
}
