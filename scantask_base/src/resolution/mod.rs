//! # Task resolution
//!
//! Leaf-first: value resolver, translators, pixel-format, source, stream and
//! action resolvers, and the engine that drives them top-down.

pub mod action;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod pixel_format;
pub mod source;
pub mod stream;
pub mod translators;
pub mod value_resolver;

pub use engine::{TaskResolution, TaskResolutionEngine};
pub use error::{NodeKind, ResolutionError};
pub use outcome::Outcome;
pub use translators::Translation;
