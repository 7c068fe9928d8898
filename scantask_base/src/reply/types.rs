//! # Task Reply Types
//!
//! Serializable replies returned to the protocol caller. A task reply mirrors
//! the resolved task; an error reply describes the first fatal failure.

use serde::{Deserialize, Serialize};

/// Reply for a task that resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReply {
    /// Unique identifier for this reply
    pub reply_id: String,

    pub actions: Vec<ActionReply>,

    /// Backend argument string the task produced
    pub arguments: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolution: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReply {
    pub action: String,
    pub results: ActionResults,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub streams: Vec<StreamReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResults {
    pub success: bool,

    /// `success`, `successIgnore` or `unsupported`
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamReply {
    pub sources: Vec<SourceReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReply {
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub capabilities: Vec<CapabilityReply>,
    pub pixel_formats: Vec<PixelFormatReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelFormatReply {
    pub pixel_format: String,
    pub attributes: Vec<CapabilityReply>,
}

/// One capability: the chosen token plus every candidate considered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityReply {
    pub attribute: String,
    pub chosen: String,
    pub values: Vec<ValueReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReply {
    pub value: String,
    pub token: String,
    pub exception: String,
    pub json_key: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub vendor: String,
}

/// Reply for a task that could not be resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReply {
    pub reply_id: String,
    pub results: ErrorResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResults {
    /// Always false
    pub success: bool,

    /// Protocol error code, e.g. `invalidValue`
    pub code: String,

    /// Dotted path of the offending node
    pub json_key: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub literal: Option<String>,

    /// 0 is most severe
    pub severity: i32,

    pub message: String,
}

/// Either reply shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Task(TaskReply),
    Error(ErrorReply),
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Task(_))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
