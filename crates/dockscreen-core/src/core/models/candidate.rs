use std::collections::HashMap;

/// An ordered set of candidate molecules submitted for screening.
///
/// Input order is preserved end-to-end because the final score vector is
/// positional: slot `i` of the output corresponds to `smiles[i]` of the
/// input. The same structural string may appear at several input positions;
/// every such position receives the score resolved for that string.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    smiles: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl CandidateSet {
    pub fn new<I, S>(smiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let smiles: Vec<String> = smiles.into_iter().map(Into::into).collect();
        let mut positions: HashMap<String, Vec<usize>> = HashMap::with_capacity(smiles.len());
        for (i, smi) in smiles.iter().enumerate() {
            positions.entry(smi.clone()).or_default().push(i);
        }
        Self { smiles, positions }
    }

    /// Number of input positions (not unique structures).
    pub fn len(&self) -> usize {
        self.smiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smiles.is_empty()
    }

    pub fn contains(&self, smiles: &str) -> bool {
        self.positions.contains_key(smiles)
    }

    /// All input positions occupied by this structural string.
    ///
    /// Returns an empty slice for strings that were never submitted.
    pub fn positions(&self, smiles: &str) -> &[usize] {
        self.positions.get(smiles).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidates in their original input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.smiles.iter().map(String::as_str)
    }
}
