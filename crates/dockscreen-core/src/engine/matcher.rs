use crate::core::io::library::{LibraryError, LibraryScanner};
use crate::core::models::candidate::CandidateSet;
use crate::core::models::library::MatchedPair;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use tracing::{debug, info};

/// Outcome of joining the library against the candidate set.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Deduplicated matched pairs in chunk-arrival order.
    pub pairs: Vec<MatchedPair>,
    /// Exact (smiles, identifier) tuples seen more than once and dropped.
    pub duplicates: usize,
    /// Total library rows scanned.
    pub rows_scanned: u64,
}

/// Streams the library in bounded chunks and inner-joins each chunk against
/// the candidate set on the structural string.
///
/// The first occurrence of each (smiles, identifier) tuple wins, across all
/// chunks; repeats only bump the duplicate counter. A candidate matching
/// several distinct identifiers fans out into several pairs.
pub fn match_candidates(
    candidates: &CandidateSet,
    scanner: &mut LibraryScanner,
    reporter: &ProgressReporter,
) -> Result<MatchOutcome, LibraryError> {
    let mut outcome = MatchOutcome::default();
    let mut seen: HashSet<MatchedPair> = HashSet::new();

    while let Some(chunk) = scanner.next_chunk()? {
        let chunk_rows = chunk.len() as u64;
        let mut chunk_matched = 0u64;

        for entry in chunk {
            if !candidates.contains(&entry.smiles) {
                continue;
            }
            chunk_matched += 1;
            let pair = MatchedPair::from(entry);
            if seen.insert(pair.clone()) {
                outcome.pairs.push(pair);
            } else {
                outcome.duplicates += 1;
            }
        }

        outcome.rows_scanned += chunk_rows;
        debug!(
            "Scanned chunk of {} rows, {} matched this chunk.",
            chunk_rows, chunk_matched
        );
        reporter.report(Progress::ChunkScanned {
            rows: chunk_rows,
            matched: chunk_matched,
        });
    }

    if outcome.duplicates > 0 {
        info!(
            "Dropped {} duplicate (smiles, identifier) pairs.",
            outcome.duplicates
        );
    }
    info!(
        "Matched {} unique pairs across {} library rows.",
        outcome.pairs.len(),
        outcome.rows_scanned
    );
    Ok(outcome)
}
