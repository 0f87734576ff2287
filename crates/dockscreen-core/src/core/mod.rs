//! # Core Module
//!
//! Fundamental data structures and format-level I/O for virtual screening.
//!
//! This layer is stateless: it defines how candidates, library rows, and
//! docking results are represented ([`models`]) and how the external
//! pipeline's file formats are read and written ([`io`]). Everything that
//! sequences these pieces into a screening run lives in the `engine` layer.

pub mod io;
pub mod models;
