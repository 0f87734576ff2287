//! # dockscreen Core Library
//!
//! A library for orchestrating large-scale virtual screening against a
//! DOCK3-style batch docking pipeline.
//!
//! Given an ordered set of candidate molecules (SMILES strings) and a large
//! compound library annotated with identifiers, the library resolves which
//! candidates exist in the library, drives an external batch docking run
//! against a receptor target, and reconciles the per-compound docking scores
//! back onto the original candidate ordering.
//!
//! ## Architectural Philosophy
//!
//! The crate follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (candidates, library
//!   entries, docking results) and format-level I/O: the chunked library
//!   scanner, the pipeline input writer, and the parsers for the pipeline's
//!   results file and raw OUTDOCK engine logs.
//!
//! - **[`engine`]: The Logic Core.** The stateful orchestration layer: the
//!   chunked library matcher, the scoped staging directory, the blocking
//!   pipeline runner, the score reconciler, and the result archiver.
//!
//! - **[`workflows`]: The Public API.** The user-facing entry point tying the
//!   engine together into one complete screening procedure with a
//!   degrade-to-missing failure contract.

pub mod core;
pub mod engine;
pub mod workflows;
