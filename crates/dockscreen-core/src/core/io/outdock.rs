use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Externally observable score for an identifier that never produced a
/// favorable (negative) score. All real docking scores are negative, so 0.0
/// reads as "no favorable score". Internally the parser keeps these apart
/// from real scores; see [`OutdockScores::best_score`].
pub const NO_SCORE_SENTINEL: f64 = 0.0;

/// Minimum whitespace-delimited fields a pose record must carry.
const MIN_SCORE_FIELDS: usize = 21;
/// Zero-based position of the total-score field in a pose record.
const TOTAL_SCORE_FIELD: usize = 20;

#[derive(Debug, Error)]
pub enum OutdockError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Best (most negative) score per identifier, extracted from an OUTDOCK log.
///
/// Iteration and serialization are identifier-sorted for determinism.
#[derive(Debug, Default)]
pub struct OutdockScores {
    best: BTreeMap<String, Option<f64>>,
}

impl OutdockScores {
    /// The best score recorded for an identifier, or `None` when the
    /// identifier appeared in the log but never produced a favorable score.
    pub fn best_score(&self, identifier: &str) -> Option<f64> {
        self.best.get(identifier).copied().flatten()
    }

    /// The best score with the external 0.0 sentinel applied.
    pub fn score_or_sentinel(&self, identifier: &str) -> f64 {
        self.best_score(identifier).unwrap_or(NO_SCORE_SENTINEL)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Identifier-sorted (identifier, score) pairs with the sentinel applied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.best
            .iter()
            .map(|(id, best)| (id.as_str(), best.unwrap_or(NO_SCORE_SENTINEL)))
    }

    /// Serializes as sorted `identifier,score` CSV lines.
    pub fn write_csv(&self, writer: &mut impl Write) -> io::Result<()> {
        for (identifier, score) in self.iter() {
            writeln!(writer, "{},{}", identifier, score)?;
        }
        Ok(())
    }
}

/// Scan state: either looking for the next identifier-bearing header line,
/// or attributing pose records to the most recently seen identifier.
enum ScanState {
    Seeking,
    Accumulating { identifier: String },
}

/// Line scanner for raw OUTDOCK engine logs.
///
/// Header lines embed the compound identifier inside a path-like substring
/// (`.../ZINC000123.db2...`); the indented pose records that follow carry one
/// score each in the total-score field. The scanner keeps the strictly most
/// negative score per identifier. Non-numeric or short lines are silently
/// skipped, never fatal.
pub struct OutdockParser {
    identifier_pattern: Regex,
    pose_pattern: Regex,
    state: ScanState,
    scores: OutdockScores,
}

impl OutdockParser {
    pub fn new() -> Self {
        Self {
            identifier_pattern: Regex::new(r"/ZINC([^/.]+)").expect("identifier pattern"),
            pose_pattern: Regex::new(r"^\s+\d+\s+\S+\s+\d+\s+\d+\s+\d+").expect("pose pattern"),
            state: ScanState::Seeking,
            scores: OutdockScores::default(),
        }
    }

    pub fn process_line(&mut self, line: &str) {
        if line.contains("/ZINC") {
            if let Some(caps) = self.identifier_pattern.captures(line) {
                let identifier = format!("ZINC{}", &caps[1]);
                self.scores.best.entry(identifier.clone()).or_insert(None);
                self.state = ScanState::Accumulating { identifier };
            }
            // Header lines never double as pose records.
            return;
        }

        let ScanState::Accumulating { identifier } = &self.state else {
            return;
        };
        if !self.pose_pattern.is_match(line) {
            return;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_SCORE_FIELDS {
            return;
        }
        let Ok(score) = fields[TOTAL_SCORE_FIELD].parse::<f64>() else {
            return;
        };

        let best = self
            .scores
            .best
            .get_mut(identifier)
            .expect("accumulating identifier is registered");
        // Replace only when strictly more negative than the running best;
        // an unset best counts as the 0.0 sentinel.
        if score < best.unwrap_or(NO_SCORE_SENTINEL) {
            *best = Some(score);
        }
    }

    pub fn finish(self) -> OutdockScores {
        self.scores
    }
}

impl Default for OutdockParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an OUTDOCK log from a buffered reader.
pub fn parse_outdock(reader: impl BufRead) -> io::Result<OutdockScores> {
    let mut parser = OutdockParser::new();
    for line in reader.lines() {
        parser.process_line(&line?);
    }
    Ok(parser.finish())
}

/// Parses an OUTDOCK log file from disk.
pub fn parse_outdock_file(path: &Path) -> Result<OutdockScores, OutdockError> {
    let display = path.to_string_lossy().to_string();
    let file = File::open(path).map_err(|e| OutdockError::Io {
        path: display.clone(),
        source: e,
    })?;
    parse_outdock(BufReader::new(file)).map_err(|e| OutdockError::Io {
        path: display,
        source: e,
    })
}
