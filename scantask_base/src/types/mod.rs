//! Output types of the resolution engine
pub mod capability;
pub mod resolved;

pub use capability::{Capability, CapabilityValue};
pub use resolved::{
    ActionStatus, ResolvedAction, ResolvedPixelFormat, ResolvedSource, ResolvedStream,
    ResolvedTask,
};
