use crate::cli::ScreenArgs;
use crate::error::{CliError, Result};
use dockscreen::engine::config::{ScreenConfig, ScreenConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Screening configuration as it appears in a TOML file.
///
/// Every field is optional; the CLI merges file values with command-line
/// overrides (command line wins) and the core builder supplies defaults for
/// whatever remains unset.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileScreenConfig {
    pub library: Option<PathBuf>,
    pub dockfiles: Option<PathBuf>,
    #[serde(rename = "scripts-dir")]
    pub scripts_dir: Option<PathBuf>,
    #[serde(rename = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[serde(rename = "staging-root")]
    pub staging_root: Option<PathBuf>,
    #[serde(rename = "identifier-column")]
    pub identifier_column: Option<String>,
    #[serde(rename = "chunk-size")]
    pub chunk_size: Option<usize>,
}

impl FileScreenConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!("Loaded screening configuration from {:?}.", path);
        Ok(config)
    }

    /// Merges file values with CLI overrides into the core configuration.
    pub fn merge_with_cli(self, args: &ScreenArgs) -> Result<ScreenConfig> {
        let mut builder = ScreenConfigBuilder::new();

        if let Some(path) = args.dockfiles.clone().or(self.dockfiles) {
            builder = builder.dockfiles_dir(path);
        }
        if let Some(path) = args.library.clone().or(self.library) {
            builder = builder.library_file(path);
        }
        if let Some(path) = args.scripts_dir.clone().or(self.scripts_dir) {
            builder = builder.scripts_dir(path);
        }
        if let Some(path) = args.output_dir.clone().or(self.output_dir) {
            builder = builder.output_dir(path);
        }
        if let Some(path) = args.staging_root.clone().or(self.staging_root) {
            builder = builder.staging_root(path);
        }
        if let Some(column) = args.identifier_column.clone().or(self.identifier_column) {
            builder = builder.identifier_column(column);
        }
        if let Some(rows) = args.chunk_size.or(self.chunk_size) {
            builder = builder.chunk_size(rows);
        }

        Ok(builder.build()?)
    }
}
