//! # Task loader
//!
//! Builds the in-memory task tree from a JSON task document. Every node gets
//! a dotted path locator (`actions[0].streams[1].sources[0]...`), a missing
//! `exception` inherits the enclosing node's policy, and a missing `vendor`
//! is the neutral tag.

pub mod error;

pub use error::LoadError;

use crate::config::compile_time::task as limits;
use crate::config::runtime::LoaderPreferences;
use crate::logging::codes;
use crate::task::{Action, Attribute, ExceptionPolicy, PixelFormat, Source, Stream, Task, Value};
use serde_json::{Map, Value as Json};
use std::path::Path;

type JsonObject = Map<String, Json>;

/// Fields shared by every node below the task
struct NodeHeader {
    exception: ExceptionPolicy,
    vendor: String,
    path: String,
}

pub struct TaskLoader {
    preferences: LoaderPreferences,
}

impl Default for TaskLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskLoader {
    pub fn new() -> Self {
        Self::with_preferences(LoaderPreferences::default())
    }

    pub fn with_preferences(preferences: LoaderPreferences) -> Self {
        Self { preferences }
    }

    /// Load a task from a file on disk
    pub fn load_file(&self, path: &Path) -> Result<Task, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let size = std::fs::metadata(path)?.len();
        check_size(size)?;

        let content = std::fs::read_to_string(path)?;
        crate::log_debug!("Read task file", "path" => path.display(), "bytes" => size);
        self.load_str(&content)
    }

    /// Load a task from JSON text
    pub fn load_str(&self, json: &str) -> Result<Task, LoadError> {
        check_size(json.len() as u64)?;
        let document: Json = serde_json::from_str(json)?;
        self.load_value(&document)
    }

    /// Load a task from an already-parsed JSON document
    pub fn load_value(&self, document: &Json) -> Result<Task, LoadError> {
        let root = document
            .as_object()
            .ok_or_else(|| LoadError::shape("", "task must be a JSON object"))?;

        // Absent or non-array actions are left for the engine to reject
        let actions_json = match root.get("actions").and_then(Json::as_array) {
            Some(array) => array,
            None => {
                crate::log_debug!("Task has no actions array");
                return Ok(Task { actions: None });
            }
        };

        check_count("actions", actions_json.len(), limits::MAX_ACTIONS, "max_actions")?;

        let mut actions = Vec::with_capacity(actions_json.len());
        for (index, action_json) in actions_json.iter().enumerate() {
            let path = format!("actions[{}]", index);
            actions.push(self.load_action(action_json, path)?);
        }

        let task = Task {
            actions: Some(actions),
        };

        crate::log_success!(codes::success::TASK_LOADED, "Task loaded",
            "actions" => task.action_count(),
            "values" => task.count_values()
        );

        Ok(task)
    }

    fn load_action(&self, json: &Json, path: String) -> Result<Action, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, self.preferences.default_exception)?;
        let action = optional_string(object, "action", &header.path)?;

        let streams_json = optional_array(object, "streams", &header.path)?;
        check_count(
            &header.path,
            streams_json.len(),
            limits::MAX_STREAMS_PER_ACTION,
            "max_streams_per_action",
        )?;

        let mut streams = Vec::with_capacity(streams_json.len());
        for (index, stream_json) in streams_json.iter().enumerate() {
            let path = format!("{}.streams[{}]", header.path, index);
            streams.push(self.load_stream(stream_json, path, header.exception)?);
        }

        crate::log_debug!("Loaded action",
            "path" => &header.path,
            "action" => &action,
            "streams" => streams.len()
        );

        Ok(Action {
            action,
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
            streams,
        })
    }

    fn load_stream(
        &self,
        json: &Json,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<Stream, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, inherited)?;

        let sources_json = optional_array(object, "sources", &header.path)?;
        check_count(
            &header.path,
            sources_json.len(),
            limits::MAX_SOURCES_PER_STREAM,
            "max_sources_per_stream",
        )?;

        let mut sources = Vec::with_capacity(sources_json.len());
        for (index, source_json) in sources_json.iter().enumerate() {
            let path = format!("{}.sources[{}]", header.path, index);
            sources.push(self.load_source(source_json, path, header.exception)?);
        }

        Ok(Stream {
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
            sources,
        })
    }

    fn load_source(
        &self,
        json: &Json,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<Source, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, inherited)?;
        let source = optional_string(object, "source", &header.path)?;

        let formats_json = optional_array(object, "pixelFormats", &header.path)?;
        check_count(
            &header.path,
            formats_json.len(),
            limits::MAX_PIXEL_FORMATS_PER_SOURCE,
            "max_pixel_formats_per_source",
        )?;

        let mut pixel_formats = Vec::with_capacity(formats_json.len());
        for (index, format_json) in formats_json.iter().enumerate() {
            let path = format!("{}.pixelFormats[{}]", header.path, index);
            pixel_formats.push(self.load_pixel_format(format_json, path, header.exception)?);
        }

        Ok(Source {
            source,
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
            pixel_formats,
        })
    }

    fn load_pixel_format(
        &self,
        json: &Json,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<PixelFormat, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, inherited)?;
        let pixel_format = optional_string(object, "pixelFormat", &header.path)?;

        let attributes_json = optional_array(object, "attributes", &header.path)?;
        check_count(
            &header.path,
            attributes_json.len(),
            limits::MAX_ATTRIBUTES_PER_PIXEL_FORMAT,
            "max_attributes_per_pixel_format",
        )?;

        let mut attributes = Vec::with_capacity(attributes_json.len());
        for (index, attribute_json) in attributes_json.iter().enumerate() {
            let path = format!("{}.attributes[{}]", header.path, index);
            attributes.push(self.load_attribute(attribute_json, path, header.exception)?);
        }

        Ok(PixelFormat {
            pixel_format,
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
            attributes,
        })
    }

    fn load_attribute(
        &self,
        json: &Json,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<Attribute, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, inherited)?;
        let attribute = optional_string(object, "attribute", &header.path)?;

        let values_json = optional_array(object, "values", &header.path)?;
        check_count(
            &header.path,
            values_json.len(),
            limits::MAX_VALUES_PER_ATTRIBUTE,
            "max_values_per_attribute",
        )?;

        let mut values = Vec::with_capacity(values_json.len());
        for (index, value_json) in values_json.iter().enumerate() {
            let path = format!("{}.values[{}]", header.path, index);
            values.push(self.load_value_node(value_json, path, header.exception)?);
        }

        Ok(Attribute {
            attribute,
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
            values,
        })
    }

    fn load_value_node(
        &self,
        json: &Json,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<Value, LoadError> {
        let object = as_object(json, &path)?;
        let header = self.header(object, path, inherited)?;

        let value = match object.get("value") {
            Some(Json::String(s)) => s.clone(),
            Some(Json::Number(n)) if self.preferences.accept_non_string_literals => n.to_string(),
            Some(Json::Bool(b)) if self.preferences.accept_non_string_literals => b.to_string(),
            Some(_) => {
                return Err(LoadError::shape(
                    &header.path,
                    "'value' must be a string literal",
                ))
            }
            None => return Err(LoadError::shape(&header.path, "missing 'value'")),
        };
        check_literal(&value, &header.path)?;

        Ok(Value {
            value,
            exception: header.exception,
            vendor: header.vendor,
            path: header.path,
        })
    }

    fn header(
        &self,
        object: &JsonObject,
        path: String,
        inherited: ExceptionPolicy,
    ) -> Result<NodeHeader, LoadError> {
        let exception = match object.get("exception") {
            None => inherited,
            Some(Json::String(s)) => ExceptionPolicy::parse(s),
            Some(_) => return Err(LoadError::shape(&path, "'exception' must be a string")),
        };

        let vendor = optional_string(object, "vendor", &path)?;

        Ok(NodeHeader {
            exception,
            vendor,
            path,
        })
    }
}

// ============================================================================
// JSON SHAPE HELPERS
// ============================================================================

fn as_object<'a>(json: &'a Json, path: &str) -> Result<&'a JsonObject, LoadError> {
    json.as_object()
        .ok_or_else(|| LoadError::shape(path, "expected a JSON object"))
}

/// Missing string fields read as empty; present ones must be strings
fn optional_string(object: &JsonObject, key: &str, path: &str) -> Result<String, LoadError> {
    match object.get(key) {
        None | Some(Json::Null) => Ok(String::new()),
        Some(Json::String(s)) => {
            check_literal(s, path)?;
            Ok(s.clone())
        }
        Some(_) => Err(LoadError::shape(path, format!("'{}' must be a string", key))),
    }
}

fn optional_array<'a>(
    object: &'a JsonObject,
    key: &str,
    path: &str,
) -> Result<&'a [Json], LoadError> {
    match object.get(key) {
        None | Some(Json::Null) => Ok(&[]),
        Some(Json::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(LoadError::shape(path, format!("'{}' must be an array", key))),
    }
}

fn check_size(size: u64) -> Result<(), LoadError> {
    if size > limits::MAX_TASK_BYTES {
        return Err(LoadError::TooLarge {
            size,
            limit: limits::MAX_TASK_BYTES,
        });
    }
    Ok(())
}

fn check_count(
    path: &str,
    count: usize,
    limit: usize,
    limit_name: &'static str,
) -> Result<(), LoadError> {
    if count > limit {
        return Err(LoadError::LimitExceeded {
            path: path.to_string(),
            limit_name,
            limit,
        });
    }
    Ok(())
}

fn check_literal(literal: &str, path: &str) -> Result<(), LoadError> {
    check_count(
        path,
        literal.len(),
        limits::MAX_LITERAL_LENGTH,
        "max_literal_length",
    )
}
