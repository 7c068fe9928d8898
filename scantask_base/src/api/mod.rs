//! # Public API for the scan task engine
//!
//! High-level interfaces for loading, resolving and replying to tasks.
pub mod config;
pub mod errors;
pub mod processor;

pub use crate::reply::{ErrorReply, Reply, ReplyGenerator, TaskReply};
pub use crate::resolution::{NodeKind, ResolutionError, TaskResolution, TaskResolutionEngine};
pub use crate::types::{
    ActionStatus, Capability, CapabilityValue, ResolvedAction, ResolvedPixelFormat,
    ResolvedSource, ResolvedStream, ResolvedTask,
};
pub use config::ProcessorConfig;
pub use errors::ProcessorError;
pub use processor::{BatchSummary, ProcessResult, TaskProcessor};
