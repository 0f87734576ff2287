use super::library::MatchedPair;

/// Per-pair docking record for one screening invocation.
///
/// Created once per matched pair with the score unset, filled in by the
/// result parser, and discarded when the invocation ends. The archiver
/// persists a serialized copy, never the in-memory record.
#[derive(Debug, Clone)]
pub struct DockingResult {
    pub smiles: String,
    pub identifier: String,
    /// `None` until the pipeline output resolves a score for this pair.
    pub score: Option<f64>,
}

impl DockingResult {
    pub fn unscored(pair: MatchedPair) -> Self {
        Self {
            smiles: pair.smiles,
            identifier: pair.identifier,
            score: None,
        }
    }
}
