use crate::core::io::input::INPUT_BASENAME;
use crate::core::io::results::RESULTS_BASENAME;
use crate::engine::error::EngineError;
use crate::engine::staging::StagingDir;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Entry script of the external docking pipeline.
const PIPELINE_SCRIPT: &str = "run_pipeline.sh";

/// Captured output of a successful pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The results artifact the parser consumes next.
    pub results_file: PathBuf,
    pub stdout: String,
    pub stderr: String,
}

/// Blocking driver for the external batch docking pipeline.
///
/// The pipeline is an opaque subprocess: it consumes the staged input file
/// and the dockfile directory, and is expected to leave a results artifact
/// in the working directory. The runner blocks until the process exits;
/// callers needing timeouts must wrap the call themselves.
pub struct PipelineRunner {
    dockfiles_dir: PathBuf,
}

impl PipelineRunner {
    pub fn new(dockfiles_dir: PathBuf) -> Self {
        Self { dockfiles_dir }
    }

    /// Runs the pipeline to completion inside the staging directory.
    ///
    /// A non-zero exit surfaces as [`EngineError::Pipeline`] carrying the
    /// captured stdout/stderr. A zero exit without the results artifact is a
    /// contract violation, reported as [`EngineError::MissingArtifact`].
    pub fn run(&self, staging: &StagingDir) -> Result<PipelineOutput, EngineError> {
        let script = staging.join(PIPELINE_SCRIPT);
        info!(
            "Invoking docking pipeline in {:?} against dockfiles {:?}.",
            staging.path(),
            self.dockfiles_dir
        );

        let output = Command::new("bash")
            .arg(&script)
            .arg(INPUT_BASENAME)
            .arg(&self.dockfiles_dir)
            .current_dir(staging.path())
            .env("DOCKFILES", &self.dockfiles_dir)
            .output()
            .map_err(|e| EngineError::Launch { source: e })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!("Pipeline exited with status {:?}.", output.status.code());

        if !output.status.success() {
            return Err(EngineError::Pipeline {
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        let results_file = staging.join(RESULTS_BASENAME);
        if !results_file.is_file() {
            return Err(EngineError::MissingArtifact { path: results_file });
        }

        Ok(PipelineOutput {
            results_file,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::core::io::input::write_input_file;
    use crate::core::models::library::MatchedPair;
    use std::fs;
    use tempfile::tempdir;

    fn staged_run(pipeline_script: &str) -> (tempfile::TempDir, StagingDir) {
        let dir = tempdir().unwrap();
        let scripts = dir.path().join("scripts");
        fs::create_dir(&scripts).unwrap();
        fs::write(scripts.join(PIPELINE_SCRIPT), pipeline_script).unwrap();

        let staging = StagingDir::acquire(&dir.path().join("staging"), &scripts).unwrap();
        let pairs = vec![MatchedPair {
            smiles: "CCO".to_string(),
            identifier: "ZINC000001".to_string(),
        }];
        write_input_file(&staging.join(INPUT_BASENAME), &pairs).unwrap();
        (dir, staging)
    }

    #[test]
    fn successful_run_yields_the_results_artifact() {
        let script = "#!/bin/bash\n\
                      while IFS=$'\\t' read -r smi id; do\n\
                      echo \"$id,-7.5\"\n\
                      done < \"$1\" > results.smi\n";
        let (dir, staging) = staged_run(script);
        let runner = PipelineRunner::new(dir.path().to_path_buf());

        let output = runner.run(&staging).unwrap();

        assert!(output.results_file.is_file());
        let results = fs::read_to_string(&output.results_file).unwrap();
        assert_eq!(results, "ZINC000001,-7.5\n");
    }

    #[test]
    fn pipeline_receives_the_dockfiles_environment() {
        let script = "#!/bin/bash\necho \"$DOCKFILES\" > results.smi\n";
        let (dir, staging) = staged_run(script);
        let runner = PipelineRunner::new(dir.path().to_path_buf());

        let output = runner.run(&staging).unwrap();

        let contents = fs::read_to_string(&output.results_file).unwrap();
        assert_eq!(contents.trim(), dir.path().to_string_lossy());
    }

    #[test]
    fn nonzero_exit_carries_captured_output() {
        let script = "#!/bin/bash\necho progress note\necho boom >&2\nexit 3\n";
        let (dir, staging) = staged_run(script);
        let runner = PipelineRunner::new(dir.path().to_path_buf());

        let err = runner.run(&staging).unwrap_err();

        match err {
            EngineError::Pipeline {
                status,
                stdout,
                stderr,
            } => {
                assert_eq!(status, Some(3));
                assert!(stdout.contains("progress note"));
                assert!(stderr.contains("boom"));
            }
            other => panic!("expected pipeline failure, got {:?}", other),
        }
    }

    #[test]
    fn success_without_results_is_a_contract_violation() {
        let script = "#!/bin/bash\nexit 0\n";
        let (dir, staging) = staged_run(script);
        let runner = PipelineRunner::new(dir.path().to_path_buf());

        let err = runner.run(&staging).unwrap_err();

        assert!(matches!(
            err,
            EngineError::MissingArtifact { path } if path.ends_with(RESULTS_BASENAME)
        ));
    }
}
