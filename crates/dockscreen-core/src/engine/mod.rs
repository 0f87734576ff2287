//! # Engine Module
//!
//! The stateful orchestration layer for one screening invocation.
//!
//! - [`config`]: screening configuration and construction-time validation.
//! - [`matcher`]: chunked library-versus-candidate matching.
//! - [`staging`]: the exclusive, self-cleaning working directory.
//! - [`runner`]: blocking invocation of the external docking pipeline.
//! - [`reconcile`]: mapping parsed scores back onto candidate order.
//! - [`archive`]: timestamped persistence of run artifacts.
//! - [`progress`]: callback-based progress reporting for front-ends.
//! - [`error`]: the engine's error taxonomy.

pub mod archive;
pub mod config;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod staging;
