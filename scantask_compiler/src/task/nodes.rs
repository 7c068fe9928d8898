//! Input task tree
//!
//! The tree is produced by the loader (or built directly by a caller) and is
//! only ever read by the resolution engine.

use serde::{Deserialize, Serialize};

/// Per-node rule for unrecognized tokens.
///
/// Anything that is not `fail` or `nextStream` behaves as `Ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExceptionPolicy {
    Fail,
    #[default]
    Ignore,
    NextStream,
}

impl ExceptionPolicy {
    /// Map a protocol string onto the policy; unknown strings default to `Ignore`
    pub fn parse(s: &str) -> Self {
        match s {
            "fail" => Self::Fail,
            "nextStream" => Self::NextStream,
            "ignore" => Self::Ignore,
            _ => Self::Ignore,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Ignore => "ignore",
            Self::NextStream => "nextStream",
        }
    }
}

impl std::fmt::Display for ExceptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields every node below the task carries
pub trait TaskNode {
    fn exception(&self) -> ExceptionPolicy;
    fn vendor(&self) -> &str;
    fn path(&self) -> &str;

    /// Ownership filter: neutral nodes belong to everyone, tagged nodes only
    /// to the matching vendor.
    fn is_owned_by(&self, vendor_id: &str) -> bool {
        self.vendor().is_empty() || self.vendor() == vendor_id
    }
}

/// Complete negotiated scan job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// `None` when the request carried no actions array at all
    pub actions: Option<Vec<Action>>,
}

impl Task {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions: Some(actions),
        }
    }

    pub fn action_count(&self) -> usize {
        self.actions.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// Total number of candidate values anywhere in the tree
    pub fn count_values(&self) -> usize {
        self.actions
            .iter()
            .flatten()
            .flat_map(|a| &a.streams)
            .flat_map(|s| &s.sources)
            .flat_map(|s| &s.pixel_formats)
            .flat_map(|p| &p.attributes)
            .map(|a| a.values.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub source: String,
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
    pub pixel_formats: Vec<PixelFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelFormat {
    pub pixel_format: String,
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub attribute: String,
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub value: String,
    pub exception: ExceptionPolicy,
    pub vendor: String,
    pub path: String,
}

// ============================================================================
// NODE ACCESSORS AND BUILDERS
// ============================================================================

macro_rules! impl_task_node {
    ($($ty:ty),+) => {
        $(
            impl TaskNode for $ty {
                fn exception(&self) -> ExceptionPolicy {
                    self.exception
                }

                fn vendor(&self) -> &str {
                    &self.vendor
                }

                fn path(&self) -> &str {
                    &self.path
                }
            }

            impl $ty {
                pub fn with_exception(mut self, exception: ExceptionPolicy) -> Self {
                    self.exception = exception;
                    self
                }

                pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
                    self.vendor = vendor.into();
                    self
                }

                pub fn with_path(mut self, path: impl Into<String>) -> Self {
                    self.path = path.into();
                    self
                }
            }
        )+
    };
}

impl_task_node!(Action, Stream, Source, PixelFormat, Attribute, Value);

impl Action {
    pub fn new(action: impl Into<String>, streams: Vec<Stream>) -> Self {
        Self {
            action: action.into(),
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
            streams,
        }
    }

    pub fn configure(streams: Vec<Stream>) -> Self {
        Self::new("configure", streams)
    }

    pub fn scan() -> Self {
        Self::new("scan", Vec::new())
    }
}

impl Stream {
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
            sources,
        }
    }
}

impl Source {
    pub fn new(source: impl Into<String>, pixel_formats: Vec<PixelFormat>) -> Self {
        Self {
            source: source.into(),
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
            pixel_formats,
        }
    }
}

impl PixelFormat {
    pub fn new(pixel_format: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            pixel_format: pixel_format.into(),
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
            attributes,
        }
    }
}

impl Attribute {
    pub fn new(attribute: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
            values,
        }
    }
}

impl Value {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exception: ExceptionPolicy::default(),
            vendor: String::new(),
            path: String::new(),
        }
    }
}
