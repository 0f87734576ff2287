use crate::core::models::candidate::CandidateSet;
use crate::core::models::result::DockingResult;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// The positional score vector plus the provenance discrepancies between
/// what was requested and what the engine returned.
#[derive(Debug)]
pub struct Reconciliation {
    /// One score per original candidate position; NaN where no score
    /// resolved.
    pub scores: Vec<f64>,
    /// Identifiers present in the engine output but never requested.
    pub unexpected_identifiers: BTreeSet<String>,
    /// Identifiers requested but absent from the engine output.
    pub missing_identifiers: BTreeSet<String>,
}

/// Maps parsed identifier scores back onto the original candidate order.
///
/// Every docking result whose identifier appears in `parsed` gets its score
/// filled in; the final vector defaults every slot to NaN and then writes
/// each resolved score into every input position sharing the matched
/// structural string. Discrepancies in either direction are recorded, never
/// fatal.
pub fn reconcile(
    candidates: &CandidateSet,
    results: &mut [DockingResult],
    parsed: &HashMap<String, f64>,
) -> Reconciliation {
    // An identifier normally maps to one pair, but nothing stops a library
    // from listing it against several structures; track every slot.
    let mut requested: HashMap<String, Vec<usize>> = HashMap::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        requested
            .entry(result.identifier.clone())
            .or_default()
            .push(i);
    }

    let mut unexpected_identifiers = BTreeSet::new();
    for (identifier, score) in parsed {
        match requested.get(identifier) {
            Some(slots) => {
                for &i in slots {
                    results[i].score = Some(*score);
                }
            }
            None => {
                unexpected_identifiers.insert(identifier.clone());
            }
        }
    }

    let missing_identifiers: BTreeSet<String> = requested
        .keys()
        .filter(|id| !parsed.contains_key(*id))
        .cloned()
        .collect();

    if !unexpected_identifiers.is_empty() {
        warn!(
            "Engine returned {} identifier(s) that were never requested.",
            unexpected_identifiers.len()
        );
    }
    if !missing_identifiers.is_empty() {
        warn!(
            "{} requested identifier(s) never appeared in the engine output.",
            missing_identifiers.len()
        );
    }

    let mut scores = vec![f64::NAN; candidates.len()];
    for result in results.iter() {
        let Some(score) = result.score else {
            continue;
        };
        for &position in candidates.positions(&result.smiles) {
            scores[position] = score;
        }
    }

    Reconciliation {
        scores,
        unexpected_identifiers,
        missing_identifiers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::library::MatchedPair;

    fn result(smiles: &str, identifier: &str) -> DockingResult {
        DockingResult::unscored(MatchedPair {
            smiles: smiles.to_string(),
            identifier: identifier.to_string(),
        })
    }

    #[test]
    fn scores_land_in_candidate_order_regardless_of_output_order() {
        let candidates = CandidateSet::new(["CCO", "CCN"]);
        let mut results = vec![result("CCO", "ZINC001"), result("CCN", "ZINC002")];
        // Engine output ordered the other way around.
        let parsed = HashMap::from([
            ("ZINC002".to_string(), -7.2),
            ("ZINC001".to_string(), -9.5),
        ]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert_eq!(reconciliation.scores, vec![-9.5, -7.2]);
        assert!(reconciliation.unexpected_identifiers.is_empty());
        assert!(reconciliation.missing_identifiers.is_empty());
    }

    #[test]
    fn unmatched_candidate_stays_nan() {
        let candidates = CandidateSet::new(["CCO", "CCCCCCCC"]);
        let mut results = vec![result("CCO", "ZINC001")];
        let parsed = HashMap::from([("ZINC001".to_string(), -5.0)]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert_eq!(reconciliation.scores[0], -5.0);
        assert!(reconciliation.scores[1].is_nan());
    }

    #[test]
    fn requested_but_unscored_identifier_is_missing_and_nan() {
        let candidates = CandidateSet::new(["CCO", "CCN"]);
        let mut results = vec![result("CCO", "ZINC001"), result("CCN", "ZINC002")];
        let parsed = HashMap::from([("ZINC001".to_string(), -5.0)]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert!(reconciliation.scores[1].is_nan());
        assert_eq!(
            reconciliation.missing_identifiers,
            BTreeSet::from(["ZINC002".to_string()])
        );
        assert!(results[1].score.is_none());
    }

    #[test]
    fn unexpected_identifier_is_reported_and_never_scored() {
        let candidates = CandidateSet::new(["CCO"]);
        let mut results = vec![result("CCO", "ZINC001")];
        let parsed = HashMap::from([
            ("ZINC001".to_string(), -5.0),
            ("ZINC999".to_string(), -12.0),
        ]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert_eq!(reconciliation.scores, vec![-5.0]);
        assert_eq!(
            reconciliation.unexpected_identifiers,
            BTreeSet::from(["ZINC999".to_string()])
        );
    }

    #[test]
    fn duplicate_candidates_all_receive_the_score() {
        let candidates = CandidateSet::new(["CCO", "CCN", "CCO"]);
        let mut results = vec![result("CCO", "ZINC001")];
        let parsed = HashMap::from([("ZINC001".to_string(), -3.3)]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert_eq!(reconciliation.scores[0], -3.3);
        assert!(reconciliation.scores[1].is_nan());
        assert_eq!(reconciliation.scores[2], -3.3);
    }

    #[test]
    fn identifier_shared_by_several_pairs_fills_every_slot() {
        let candidates = CandidateSet::new(["CCO", "OCC"]);
        let mut results = vec![result("CCO", "ZINC001"), result("OCC", "ZINC001")];
        let parsed = HashMap::from([("ZINC001".to_string(), -6.1)]);

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert_eq!(reconciliation.scores, vec![-6.1, -6.1]);
        assert_eq!(results[0].score, Some(-6.1));
        assert_eq!(results[1].score, Some(-6.1));
        assert!(reconciliation.missing_identifiers.is_empty());
    }

    #[test]
    fn empty_parse_leaves_every_slot_nan() {
        let candidates = CandidateSet::new(["CCO"]);
        let mut results = vec![result("CCO", "ZINC001")];
        let parsed = HashMap::new();

        let reconciliation = reconcile(&candidates, &mut results, &parsed);

        assert!(reconciliation.scores[0].is_nan());
        assert_eq!(reconciliation.missing_identifiers.len(), 1);
    }
}
