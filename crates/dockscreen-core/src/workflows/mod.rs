//! # Workflows Module
//!
//! The public, user-facing API. [`screen`] ties the engine stages together
//! into one complete screening procedure: match, dock, parse, reconcile,
//! archive.

pub mod screen;
