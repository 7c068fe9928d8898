//! # Reply Generator
//!
//! Converts resolution results and failures into protocol replies.
use crate::reply::types::{
    ActionReply, ActionResults, CapabilityReply, ErrorReply, ErrorResults, PixelFormatReply,
    SourceReply, StreamReply, TaskReply, ValueReply,
};
use crate::resolution::{ResolutionError, TaskResolution};
use crate::types::{Capability, ResolvedAction, ResolvedPixelFormat, ResolvedSource};
use scantask_compiler::loader::LoadError;
use scantask_compiler::logging::codes;

pub struct ReplyGenerator;

impl ReplyGenerator {
    /// Reply mirroring a resolved task
    pub fn task_reply(resolution: &TaskResolution) -> TaskReply {
        TaskReply {
            reply_id: new_reply_id(),
            actions: resolution
                .task
                .actions
                .iter()
                .map(Self::action_reply)
                .collect(),
            arguments: resolution.arguments.clone(),
            resolution: resolution.resolution,
        }
    }

    /// Reply for a fatal resolution failure
    pub fn error_reply(error: &ResolutionError) -> ErrorReply {
        let code = match error {
            ResolutionError::MalformedInput { .. } => "invalidTask",
            ResolutionError::UnsupportedValue { .. } => "invalidValue",
        };

        ErrorReply {
            reply_id: new_reply_id(),
            results: ErrorResults {
                success: false,
                code: code.to_string(),
                json_key: error.path().to_string(),
                literal: error.literal().map(str::to_string),
                severity: error.severity_code(),
                message: error.to_string(),
            },
        }
    }

    /// Reply for a task that could not be loaded
    pub fn load_error_reply(error: &LoadError) -> ErrorReply {
        let code = match error {
            LoadError::InvalidJson(_) => "invalidJson",
            LoadError::InvalidShape { .. } | LoadError::LimitExceeded { .. } => "invalidTask",
            LoadError::TooLarge { .. } => "taskTooLarge",
            LoadError::FileNotFound { .. } | LoadError::Io(_) => "fileError",
        };

        ErrorReply {
            reply_id: new_reply_id(),
            results: ErrorResults {
                success: false,
                code: code.to_string(),
                json_key: error.path().unwrap_or_default().to_string(),
                literal: None,
                severity: codes::get_severity(error.code().as_str()).as_code(),
                message: error.to_string(),
            },
        }
    }

    /// Reply for failures outside loading and resolution
    pub fn internal_error_reply(message: impl Into<String>) -> ErrorReply {
        ErrorReply {
            reply_id: new_reply_id(),
            results: ErrorResults {
                success: false,
                code: "internalError".to_string(),
                json_key: String::new(),
                literal: None,
                severity: codes::get_severity(codes::system::INTERNAL_ERROR.as_str()).as_code(),
                message: message.into(),
            },
        }
    }

    fn action_reply(action: &ResolvedAction) -> ActionReply {
        ActionReply {
            action: action.action.clone(),
            results: ActionResults {
                success: action.status.is_success(),
                code: action.status.as_str().to_string(),
            },
            streams: action
                .streams
                .iter()
                .map(|stream| StreamReply {
                    sources: stream.sources.iter().map(Self::source_reply).collect(),
                })
                .collect(),
        }
    }

    fn source_reply(source: &ResolvedSource) -> SourceReply {
        SourceReply {
            source: source.source.clone(),
            capabilities: source
                .capabilities()
                .map(|(name, capability)| Self::capability_reply(name, capability))
                .collect(),
            pixel_formats: source
                .pixel_formats
                .iter()
                .map(Self::pixel_format_reply)
                .collect(),
        }
    }

    fn pixel_format_reply(format: &ResolvedPixelFormat) -> PixelFormatReply {
        PixelFormatReply {
            pixel_format: format.pixel_format.clone(),
            attributes: format
                .capabilities()
                .map(|(name, capability)| Self::capability_reply(name, capability))
                .collect(),
        }
    }

    fn capability_reply(name: &str, capability: &Capability) -> CapabilityReply {
        CapabilityReply {
            attribute: name.to_string(),
            chosen: capability.chosen().trim_start().to_string(),
            values: capability
                .values
                .iter()
                .map(|value| ValueReply {
                    value: value.literal().to_string(),
                    token: value.token().trim_start().to_string(),
                    exception: value.exception().as_str().to_string(),
                    json_key: value.path().to_string(),
                    vendor: value.vendor().to_string(),
                })
                .collect(),
        }
    }
}

fn new_reply_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::types::Reply;
    use crate::resolution::{NodeKind, TaskResolutionEngine};
    use scantask_compiler::task::{Action, Attribute, PixelFormat, Source, Stream, Task, Value};

    #[test]
    fn test_task_reply_mirrors_tree() {
        let task = Task::new(vec![Action::configure(vec![Stream::new(vec![Source::new(
            "feeder",
            vec![PixelFormat::new(
                "rgb24",
                vec![Attribute::new(
                    "resolution",
                    vec![Value::new("high"), Value::new("300")],
                )],
            )],
        )])])]);
        let resolution = TaskResolutionEngine::new("acme").resolve_task(&task).unwrap();

        let reply = ReplyGenerator::task_reply(&resolution);
        let action = &reply.actions[0];
        assert!(action.results.success);
        assert_eq!(action.results.code, "success");

        let source = &action.streams[0].sources[0];
        assert_eq!(source.capabilities.len(), 2);

        let attributes = &source.pixel_formats[0].attributes;
        assert_eq!(attributes[0].attribute, "pixelType");
        assert_eq!(attributes[1].chosen, "--resolution=300");
        assert_eq!(attributes[1].values.len(), 2);
        assert_eq!(reply.resolution, Some(300));
    }

    #[test]
    fn test_error_reply_fields() {
        let error = ResolutionError::unsupported(NodeKind::Value, "autocrop", "a.values[0]", "maybe");
        let reply = ReplyGenerator::error_reply(&error);

        assert!(!reply.results.success);
        assert_eq!(reply.results.code, "invalidValue");
        assert_eq!(reply.results.json_key, "a.values[0]");
        assert_eq!(reply.results.literal.as_deref(), Some("maybe"));
        assert_eq!(reply.results.severity, 1);

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["results"]["jsonKey"], "a.values[0]");
    }

    #[test]
    fn test_reply_round_trip_picks_shape() {
        let error = ResolutionError::malformed("task has no actions", "actions");
        let json = Reply::Error(ReplyGenerator::error_reply(&error))
            .to_json_compact()
            .unwrap();

        let parsed = Reply::from_json(&json).unwrap();
        assert!(!parsed.is_success());
    }

    #[test]
    fn test_load_error_reply() {
        let error = LoadError::InvalidShape {
            path: "actions[0]".to_string(),
            message: "expected a JSON object".to_string(),
        };
        let reply = ReplyGenerator::load_error_reply(&error);
        assert_eq!(reply.results.code, "invalidTask");
        assert_eq!(reply.results.json_key, "actions[0]");
    }
}
