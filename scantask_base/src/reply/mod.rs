//! # Task Replies
//!
//! Protocol-facing replies built from resolution results.
//!
//! ## Core Types
//! - [`TaskReply`] - Reply mirroring a resolved task
//! - [`ErrorReply`] - Reply describing the first fatal failure
//! - [`ReplyGenerator`] - Builds either reply

pub mod generator;
pub mod types;

pub use generator::ReplyGenerator;
pub use types::*;
