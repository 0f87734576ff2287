/// One row of the reference library: a structural string and the identifier
/// the docking pipeline knows it by.
///
/// Library rows are read-only; they are never mutated after the scanner
/// produces them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryEntry {
    pub smiles: String,
    pub identifier: String,
}

/// A (smiles, identifier) tuple present in both the candidate set and the
/// library.
///
/// Uniqueness invariant: no two pairs in a match set share the same exact
/// tuple. The matcher keeps the first occurrence in chunk-arrival order and
/// counts every repeat as a duplicate. A candidate string matching several
/// distinct identifiers fans out into several pairs; fan-out is not
/// duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchedPair {
    pub smiles: String,
    pub identifier: String,
}

impl From<LibraryEntry> for MatchedPair {
    fn from(entry: LibraryEntry) -> Self {
        Self {
            smiles: entry.smiles,
            identifier: entry.identifier,
        }
    }
}
