//! Data models for one screening invocation.
//!
//! All entities here are scoped to a single screening call; nothing persists
//! across calls except the artifacts the archiver copies to disk.

pub mod candidate;
pub mod library;
pub mod result;
