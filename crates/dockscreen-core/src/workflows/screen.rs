use crate::core::io::input::{INPUT_BASENAME, write_input_file};
use crate::core::io::library::LibraryScanner;
use crate::core::io::results::parse_results_file;
use crate::core::models::candidate::CandidateSet;
use crate::core::models::result::DockingResult;
use crate::engine::archive::Archiver;
use crate::engine::config::{ConfigError, ScreenConfig};
use crate::engine::error::EngineError;
use crate::engine::matcher::{MatchOutcome, match_candidates};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reconcile::reconcile;
use crate::engine::runner::PipelineRunner;
use crate::engine::staging::StagingDir;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use tracing::{debug, info, instrument, warn};

/// Basename of the serialized report written into the output directory.
pub const REPORT_BASENAME: &str = "screen_report.toml";

/// Bookkeeping for one completed (or degraded) screening invocation.
///
/// Persisted as TOML alongside the archived artifacts so a finished run can
/// be audited without the in-memory screen.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScreenReport {
    pub candidates: usize,
    pub matched_pairs: usize,
    pub duplicate_pairs: usize,
    pub rows_scanned: u64,
    pub skipped_result_lines: usize,
    pub unexpected_identifiers: BTreeSet<String>,
    pub missing_identifiers: BTreeSet<String>,
}

/// A configured virtual screen against one receptor target.
///
/// Construction validates the configuration (library, dockfiles, scripts);
/// an invalid setup never gets as far as an invocation. After construction,
/// [`screen`](VirtualScreen::screen) may be called repeatedly; each call is
/// an independent invocation with its own staging directory.
///
/// Invocations must not overlap: the screen owns per-call state (the docking
/// results and the report), which is why `screen` takes `&mut self`.
pub struct VirtualScreen {
    config: ScreenConfig,
    runner: PipelineRunner,
    archiver: Archiver,
    results: Vec<DockingResult>,
    report: Option<ScreenReport>,
}

impl VirtualScreen {
    pub fn new(config: ScreenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let runner = PipelineRunner::new(config.dockfiles_dir.clone());
        let archiver = Archiver::new(config.output_dir.clone());
        Ok(Self {
            config,
            runner,
            archiver,
            results: Vec::new(),
            report: None,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Screens an ordered sequence of candidate SMILES strings.
    ///
    /// Returns one score per input position, NaN for every candidate that
    /// resolved no score. This call never fails: a pipeline or parse failure
    /// degrades to an all-missing vector with the diagnostic logged, per the
    /// public contract. Configuration problems are caught earlier, at
    /// construction.
    pub fn screen(&mut self, smiles: &[String], reporter: &ProgressReporter) -> Vec<f64> {
        match self.run(smiles, reporter) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Screening failed, returning an all-missing vector: {}", e);
                if let EngineError::Pipeline { stdout, stderr, .. } = &e {
                    debug!("Pipeline stdout:\n{}", stdout);
                    debug!("Pipeline stderr:\n{}", stderr);
                }
                vec![f64::NAN; smiles.len()]
            }
        }
    }

    /// The docking records of the most recent invocation.
    pub fn results(&self) -> &[DockingResult] {
        &self.results
    }

    /// The report of the most recent completed invocation, if any.
    pub fn last_report(&self) -> Option<&ScreenReport> {
        self.report.as_ref()
    }

    #[instrument(skip_all, name = "screen_workflow")]
    fn run(
        &mut self,
        smiles: &[String],
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, EngineError> {
        self.results.clear();
        self.report = None;

        let candidates = CandidateSet::new(smiles.iter().cloned());
        info!("Screening {} candidate molecule(s).", candidates.len());

        // === Stage 1: Chunked library matching ===
        reporter.report(Progress::StageStart {
            name: "Matching library",
        });
        let mut scanner = LibraryScanner::open(
            &self.config.library_file,
            &self.config.identifier_column,
            self.config.chunk_size,
        )?;
        let matched = match_candidates(&candidates, &mut scanner, reporter)?;
        reporter.report(Progress::StageFinish);

        self.results = matched
            .pairs
            .iter()
            .cloned()
            .map(DockingResult::unscored)
            .collect();

        if matched.pairs.is_empty() {
            warn!("No candidate matched the library; skipping pipeline invocation.");
            self.report = Some(self.base_report(&candidates, &matched));
            return Ok(vec![f64::NAN; candidates.len()]);
        }

        // === Stage 2: Batch docking run ===
        reporter.report(Progress::StageStart { name: "Docking" });
        let staging = StagingDir::acquire(&self.config.staging_root, &self.config.scripts_dir)?;
        let input_path = staging.join(INPUT_BASENAME);
        write_input_file(&input_path, &matched.pairs).map_err(|e| EngineError::Staging {
            path: input_path,
            source: e,
        })?;
        let output = self.runner.run(&staging)?;
        reporter.report(Progress::StageFinish);

        // === Stage 3: Result parsing ===
        reporter.report(Progress::StageStart {
            name: "Parsing results",
        });
        let parsed = parse_results_file(&output.results_file)?;
        info!(
            "Parsed {} score(s), skipped {} malformed line(s).",
            parsed.scores.len(),
            parsed.skipped_lines
        );
        reporter.report(Progress::StageFinish);

        // === Stage 4: Reconciliation ===
        let reconciliation = reconcile(&candidates, &mut self.results, &parsed.scores);

        // === Stage 5: Archiving ===
        reporter.report(Progress::StageStart { name: "Archiving" });
        self.archiver.archive(staging.path(), &self.results)?;

        let mut report = self.base_report(&candidates, &matched);
        report.skipped_result_lines = parsed.skipped_lines;
        report.unexpected_identifiers = reconciliation.unexpected_identifiers;
        report.missing_identifiers = reconciliation.missing_identifiers;
        self.write_report(&report)?;
        reporter.report(Progress::StageFinish);
        self.report = Some(report);

        Ok(reconciliation.scores)
    }

    fn write_report(&self, report: &ScreenReport) -> Result<(), EngineError> {
        let path = self.config.output_dir.join(REPORT_BASENAME);
        let rendered = toml::to_string(report).map_err(|e| EngineError::Report {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, rendered).map_err(|e| EngineError::Archive { path, source: e })?;
        Ok(())
    }

    fn base_report(&self, candidates: &CandidateSet, matched: &MatchOutcome) -> ScreenReport {
        ScreenReport {
            candidates: candidates.len(),
            matched_pairs: matched.pairs.len(),
            duplicate_pairs: matched.duplicates,
            rows_scanned: matched.rows_scanned,
            ..ScreenReport::default()
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::engine::config::REQUIRED_SCRIPTS;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const SCORING_PIPELINE: &str = "#!/bin/bash\n\
        while read -r smi id; do\n\
        case \"$id\" in\n\
        ZINC000001) echo \"$id,-9.5\" ;;\n\
        ZINC000002) echo \"$id,-7.2\" ;;\n\
        esac\n\
        done < \"$1\" > results.smi\n\
        echo 'ZINC000999,-12.0' >> results.smi\n\
        echo 'docked' > pipeline.log\n";

    fn fixture(pipeline_script: &str) -> (tempfile::TempDir, VirtualScreen) {
        let dir = tempdir().unwrap();
        let dockfiles = dir.path().join("dockfiles");
        let scripts = dir.path().join("scripts");
        fs::create_dir(&dockfiles).unwrap();
        fs::create_dir(&scripts).unwrap();
        for script in REQUIRED_SCRIPTS {
            fs::write(scripts.join(script), "#!/bin/bash\n").unwrap();
        }
        fs::write(scripts.join("run_pipeline.sh"), pipeline_script).unwrap();

        let library = dir.path().join("library.csv");
        fs::write(
            &library,
            "smiles,zincid\n\
             CCO,ZINC000001\n\
             CCN,ZINC000002\n\
             CCC,ZINC000003\n\
             CCO,ZINC000001\n",
        )
        .unwrap();

        let config = ScreenConfig::builder()
            .dockfiles_dir(dockfiles)
            .library_file(library)
            .scripts_dir(scripts)
            .output_dir(dir.path().join("out"))
            .staging_root(dir.path().join("staging"))
            .chunk_size(2)
            .build()
            .unwrap();
        let screen = VirtualScreen::new(config).unwrap();
        (dir, screen)
    }

    fn smiles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn construction_fails_on_invalid_configuration() {
        let dir = tempdir().unwrap();
        let config = ScreenConfig::builder()
            .dockfiles_dir(dir.path().join("absent"))
            .library_file(dir.path().join("absent.csv"))
            .scripts_dir(dir.path().join("absent-scripts"))
            .build()
            .unwrap();

        assert!(VirtualScreen::new(config).is_err());
    }

    #[test]
    fn end_to_end_scores_come_back_in_candidate_order() {
        let (_dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["CCN", "CCO", "CCCCCCCC"]);

        let scores = screen.screen(&input, &ProgressReporter::new());

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], -7.2);
        assert_eq!(scores[1], -9.5);
        assert!(scores[2].is_nan());
    }

    #[test]
    fn report_tracks_duplicates_and_discrepancies() {
        let (_dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["CCO", "CCN", "CCC"]);

        let scores = screen.screen(&input, &ProgressReporter::new());

        // ZINC000003 was requested but the pipeline never scored it.
        assert!(scores[2].is_nan());
        let report = screen.last_report().unwrap();
        assert_eq!(report.candidates, 3);
        assert_eq!(report.matched_pairs, 3);
        assert_eq!(report.duplicate_pairs, 1);
        assert_eq!(report.rows_scanned, 4);
        assert!(
            report
                .unexpected_identifiers
                .contains(&"ZINC000999".to_string())
        );
        assert!(
            report
                .missing_identifiers
                .contains(&"ZINC000003".to_string())
        );
    }

    #[test]
    fn results_accessor_reflects_the_last_invocation() {
        let (_dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["CCO"]);

        screen.screen(&input, &ProgressReporter::new());

        let results = screen.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "ZINC000001");
        assert_eq!(results[0].score, Some(-9.5));
    }

    #[test]
    fn pipeline_failure_degrades_to_all_missing() {
        let (_dir, mut screen) = fixture("#!/bin/bash\nexit 1\n");
        let input = smiles(&["CCO", "CCN"]);

        let scores = screen.screen(&input, &ProgressReporter::new());

        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.is_nan()));
    }

    #[test]
    fn missing_results_artifact_degrades_to_all_missing() {
        let (_dir, mut screen) = fixture("#!/bin/bash\nexit 0\n");
        let input = smiles(&["CCO"]);

        let scores = screen.screen(&input, &ProgressReporter::new());

        assert_eq!(scores.len(), 1);
        assert!(scores[0].is_nan());
    }

    #[test]
    fn no_library_match_skips_the_pipeline_entirely() {
        let (dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["c1ccccc1"]);

        let scores = screen.screen(&input, &ProgressReporter::new());

        assert_eq!(scores.len(), 1);
        assert!(scores[0].is_nan());
        assert_eq!(screen.last_report().unwrap().matched_pairs, 0);
        // The pipeline never ran, so no artifacts were archived.
        assert!(!dir.path().join("out").join("full_results.txt").exists());
    }

    #[test]
    fn artifacts_are_archived_and_staging_is_cleaned_up() {
        let (dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["CCO"]);

        screen.screen(&input, &ProgressReporter::new());

        let out = dir.path().join("out");
        let names: Vec<String> = fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with("results_")));
        assert!(names.iter().any(|n| n.starts_with("pipeline_")));
        assert!(names.iter().any(|n| n == "full_results.txt"));
        assert!(staging_is_empty(&dir.path().join("staging")));
    }

    #[test]
    fn report_is_persisted_alongside_the_archive() {
        let (dir, mut screen) = fixture(SCORING_PIPELINE);
        let input = smiles(&["CCO", "CCN", "CCC"]);

        screen.screen(&input, &ProgressReporter::new());

        let rendered =
            fs::read_to_string(dir.path().join("out").join(REPORT_BASENAME)).unwrap();
        assert!(rendered.contains("matched_pairs = 3"));
        assert!(rendered.contains("duplicate_pairs = 1"));
        assert!(rendered.contains("ZINC000999"));
    }

    fn staging_is_empty(root: &Path) -> bool {
        !root.exists() || fs::read_dir(root).unwrap().next().is_none()
    }
}
