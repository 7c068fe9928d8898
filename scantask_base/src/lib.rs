//! # Scan Task Base
//!
//! Resolves negotiated scan tasks into a backend argument string and an
//! outcome tree, and builds the protocol replies for both.

pub mod api;
pub mod reply;
pub mod resolution;
pub mod types;

// Convenience re-exports
pub use api::*;

pub mod prelude {
    pub use crate::api::{
        ActionStatus, BatchSummary, ProcessResult, ProcessorConfig, ProcessorError, Reply,
        ResolutionError, ResolvedTask, TaskProcessor, TaskResolution, TaskResolutionEngine,
    };

    pub use scantask_compiler::task::{
        Action, Attribute, ExceptionPolicy, PixelFormat, Source, Stream, Task, Value,
    };
}
