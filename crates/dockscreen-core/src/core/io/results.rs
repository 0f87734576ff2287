use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Base name of the results artifact the pipeline is expected to produce.
pub const RESULTS_BASENAME: &str = "results.smi";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Results file '{path}' yielded no parseable '{expected}' lines")]
    Empty { path: String, expected: &'static str },
}

/// Scores parsed from a results file.
#[derive(Debug, Default)]
pub struct ParsedScores {
    /// Identifier to score. When an identifier repeats, the last line wins.
    pub scores: HashMap<String, f64>,
    /// Lines dropped because they did not parse as `identifier,score`.
    pub skipped_lines: usize,
}

/// Parses a `results.smi`-style file of `identifier,score` CSV lines.
///
/// Each line is parsed independently: a malformed line is skipped and
/// counted, never fatal to the batch. A file that yields zero parsed lines
/// signals failure of this parse step rather than an empty-but-valid result.
pub fn parse_results_file(path: &Path) -> Result<ParsedScores, ResultsError> {
    let display = path.to_string_lossy().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ResultsError::Csv {
            path: display.clone(),
            source: e,
        })?;

    let mut parsed = ParsedScores::default();
    for record in reader.records() {
        let record = record.map_err(|e| ResultsError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let (Some(identifier), Some(raw_score)) = (record.get(0), record.get(1)) else {
            warn!("Skipping short results line: {:?}", record);
            parsed.skipped_lines += 1;
            continue;
        };
        match raw_score.trim().parse::<f64>() {
            Ok(score) => {
                parsed.scores.insert(identifier.trim().to_string(), score);
            }
            Err(_) => {
                warn!(
                    "Skipping results line with unparseable score: {},{}",
                    identifier, raw_score
                );
                parsed.skipped_lines += 1;
            }
        }
    }

    if parsed.scores.is_empty() {
        return Err(ResultsError::Empty {
            path: display,
            expected: "identifier,score",
        });
    }
    Ok(parsed)
}
