use crate::core::io::results::RESULTS_BASENAME;
use crate::core::models::result::DockingResult;
use crate::engine::error::EngineError;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the human-readable summary written alongside the archived
/// artifacts.
const SUMMARY_BASENAME: &str = "full_results.txt";

/// Files persisted by one archiving pass.
#[derive(Debug, Default)]
pub struct ArchivedFiles {
    /// Timestamped copies of the results artifact and any engine logs.
    pub copied: Vec<PathBuf>,
    /// The flat-text summary report.
    pub summary: Option<PathBuf>,
}

/// Copies transient run artifacts into permanent, timestamped storage.
///
/// The staging directory only lives for the duration of one invocation, so
/// anything worth keeping (the results file, engine logs) is copied out with
/// a timestamp in the name, and a flat summary listing every matched
/// molecule with its identifier and score is written next to them.
pub struct Archiver {
    output_dir: PathBuf,
}

impl Archiver {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn archive(
        &self,
        staging: &Path,
        results: &[DockingResult],
    ) -> Result<ArchivedFiles, EngineError> {
        let archive_err = |path: &Path, source| EngineError::Archive {
            path: path.to_path_buf(),
            source,
        };
        fs::create_dir_all(&self.output_dir).map_err(|e| archive_err(&self.output_dir, e))?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let mut archived = ArchivedFiles::default();

        let results_file = staging.join(RESULTS_BASENAME);
        if results_file.is_file() {
            let target = self.output_dir.join(format!("results_{}.smi", timestamp));
            fs::copy(&results_file, &target).map_err(|e| archive_err(&results_file, e))?;
            debug!("Archived results artifact to {:?}.", target);
            archived.copied.push(target);
        }

        let entries = fs::read_dir(staging).map_err(|e| archive_err(staging, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| archive_err(staging, e))?;
            let source = entry.path();
            if source.extension().and_then(|e| e.to_str()) != Some("log") {
                continue;
            }
            let stem = source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("pipeline");
            let target = self.output_dir.join(format!("{}_{}.log", stem, timestamp));
            fs::copy(&source, &target).map_err(|e| archive_err(&source, e))?;
            debug!("Archived log {:?} to {:?}.", source, target);
            archived.copied.push(target);
        }

        archived.summary = Some(self.write_summary(results)?);
        info!(
            "Archived {} artifact(s) and the summary to {:?}.",
            archived.copied.len(),
            self.output_dir
        );
        Ok(archived)
    }

    fn write_summary(&self, results: &[DockingResult]) -> Result<PathBuf, EngineError> {
        let path = self.output_dir.join(SUMMARY_BASENAME);
        let file = File::create(&path).map_err(|e| EngineError::Archive {
            path: path.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        for result in results {
            let score = match result.score {
                Some(score) => format!("{:.2}", score),
                None => "None".to_string(),
            };
            writeln!(
                writer,
                "SMILES: {} ZINC ID: {} Score: {}",
                result.smiles, result.identifier, score
            )
            .map_err(|e| EngineError::Archive {
                path: path.clone(),
                source: e,
            })?;
        }
        writer.flush().map_err(|e| EngineError::Archive {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
