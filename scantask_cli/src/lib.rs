//! # Scan Task CLI support
//!
//! Pieces of the `scantask` binary that are worth testing on their own.

pub mod bridge;

pub use bridge::{LogBackend, LogBridge};
