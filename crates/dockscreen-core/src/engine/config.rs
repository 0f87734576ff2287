use crate::core::io::library::DEFAULT_CHUNK_SIZE;
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scripts the pipeline stage requires before an invocation may proceed.
pub const REQUIRED_SCRIPTS: [&str; 5] = [
    "run_pipeline.sh",
    "run_3d_build.sh",
    "make_tarballs.bash",
    "run_subdock.sh",
    "parse_outdock.py",
];

/// Identifier column the library is expected to carry by default.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "zincid";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid {what} path: '{path}'", path = path.display())]
    InvalidPath { what: &'static str, path: PathBuf },

    #[error("Required pipeline script not found: '{path}'", path = path.display())]
    MissingScript { path: PathBuf },
}

/// Configuration for one virtual screen.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Receptor/dockfile directory handed to the pipeline (`DOCKFILES`).
    pub dockfiles_dir: PathBuf,
    /// CSV compound library joined against the candidates.
    pub library_file: PathBuf,
    /// Directory holding the pipeline scripts to stage per invocation.
    pub scripts_dir: PathBuf,
    /// Permanent directory for archived artifacts and the summary report.
    pub output_dir: PathBuf,
    /// Root under which each invocation acquires its exclusive staging
    /// directory.
    pub staging_root: PathBuf,
    /// Name of the library's identifier column.
    pub identifier_column: String,
    /// Library rows held in memory per chunk during matching.
    pub chunk_size: usize,
}

impl ScreenConfig {
    pub fn builder() -> ScreenConfigBuilder {
        ScreenConfigBuilder::default()
    }

    /// Construction-time validation: all referenced paths must exist and the
    /// scripts directory must carry every required pipeline script. An
    /// invocation never proceeds past a failure here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_dir("dockfiles", &self.dockfiles_dir)?;
        Self::require_file("library", &self.library_file)?;
        Self::require_dir("scripts", &self.scripts_dir)?;
        for script in REQUIRED_SCRIPTS {
            let path = self.scripts_dir.join(script);
            if !path.is_file() {
                return Err(ConfigError::MissingScript { path });
            }
        }
        Ok(())
    }

    fn require_dir(what: &'static str, path: &Path) -> Result<(), ConfigError> {
        if path.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::InvalidPath {
                what,
                path: path.to_path_buf(),
            })
        }
    }

    fn require_file(what: &'static str, path: &Path) -> Result<(), ConfigError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(ConfigError::InvalidPath {
                what,
                path: path.to_path_buf(),
            })
        }
    }
}

#[derive(Default)]
pub struct ScreenConfigBuilder {
    dockfiles_dir: Option<PathBuf>,
    library_file: Option<PathBuf>,
    scripts_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    staging_root: Option<PathBuf>,
    identifier_column: Option<String>,
    chunk_size: Option<usize>,
}

impl ScreenConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dockfiles_dir(mut self, path: PathBuf) -> Self {
        self.dockfiles_dir = Some(path);
        self
    }

    pub fn library_file(mut self, path: PathBuf) -> Self {
        self.library_file = Some(path);
        self
    }

    pub fn scripts_dir(mut self, path: PathBuf) -> Self {
        self.scripts_dir = Some(path);
        self
    }

    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }

    pub fn staging_root(mut self, path: PathBuf) -> Self {
        self.staging_root = Some(path);
        self
    }

    pub fn identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = Some(column.into());
        self
    }

    pub fn chunk_size(mut self, rows: usize) -> Self {
        self.chunk_size = Some(rows);
        self
    }

    pub fn build(self) -> Result<ScreenConfig, ConfigError> {
        let default_output = || {
            PathBuf::from(format!(
                "dockscreen_{}",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ))
        };
        Ok(ScreenConfig {
            dockfiles_dir: self
                .dockfiles_dir
                .ok_or(ConfigError::MissingParameter("dockfiles_dir"))?,
            library_file: self
                .library_file
                .ok_or(ConfigError::MissingParameter("library_file"))?,
            scripts_dir: self
                .scripts_dir
                .ok_or(ConfigError::MissingParameter("scripts_dir"))?,
            output_dir: self.output_dir.unwrap_or_else(default_output),
            staging_root: self.staging_root.unwrap_or_else(std::env::temp_dir),
            identifier_column: self
                .identifier_column
                .unwrap_or_else(|| DEFAULT_IDENTIFIER_COLUMN.to_string()),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        })
    }
}
