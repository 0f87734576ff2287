//! # I/O Module
//!
//! Format-level reading and writing for the screening pipeline.
//!
//! - [`library`]: bounded-memory chunked scanner over the reference library.
//! - [`input`]: writer for the pipeline's tab-separated input file.
//! - [`results`]: parser for the pipeline's `identifier,score` results file.
//! - [`outdock`]: best-score extraction from raw OUTDOCK engine logs.

pub mod input;
pub mod library;
pub mod outdock;
pub mod results;
