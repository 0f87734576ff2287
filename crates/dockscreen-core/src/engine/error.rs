use crate::core::io::library::LibraryError;
use crate::core::io::results::ResultsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Library scan failed: {source}")]
    Library {
        #[from]
        source: LibraryError,
    },

    #[error("Failed to stage working directory at '{path}': {source}")]
    Staging {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to launch docking pipeline: {source}")]
    Launch { source: std::io::Error },

    /// The external pipeline exited with a non-zero status. The captured
    /// stdout and stderr travel with the error so the diagnostic is never
    /// swallowed.
    #[error("Docking pipeline failed with exit status {status:?}: {stderr}")]
    Pipeline {
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The pipeline exited successfully but never produced the expected
    /// results artifact. Distinct from a process failure: this is a
    /// violation of the pipeline contract.
    #[error("Docking pipeline exited successfully but did not create '{path}'")]
    MissingArtifact { path: PathBuf },

    #[error("Result parsing failed: {source}")]
    Results {
        #[from]
        source: ResultsError,
    },

    #[error("Failed to archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize report '{path}': {source}")]
    Report {
        path: PathBuf,
        source: toml::ser::Error,
    },
}
