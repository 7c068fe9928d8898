//! Scan task front end
//!
//! Owns the input task model, the JSON task loader, the build-time limits and
//! runtime preferences, and the global logging service shared by the rest of
//! the workspace.

pub mod config;
#[macro_use]
pub mod logging;
pub mod loader;
pub mod task;

// Re-export key types for library consumers
pub use loader::{LoadError, TaskLoader};
pub use task::{
    Action, Attribute, ExceptionPolicy, PixelFormat, Source, Stream, Task, TaskNode, Value,
};
