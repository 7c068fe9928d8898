//! # Task model
//!
//! In-memory form of a negotiated scan task:
//! actions → streams → sources → pixel formats → attributes → values.

pub mod keywords;
pub mod nodes;

pub use keywords::{ActionKind, AttributeKind, PixelFormatKind, SourceKind};
pub use nodes::{
    Action, Attribute, ExceptionPolicy, PixelFormat, Source, Stream, Task, TaskNode, Value,
};
