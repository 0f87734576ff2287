use crate::core::models::library::MatchedPair;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Base name of the pipeline input file inside the staging directory.
pub const INPUT_BASENAME: &str = "input.smi";

/// Writes matched pairs in the pipeline's input format.
///
/// One `smiles<TAB>identifier` line per pair, no header, in the order the
/// pairs were matched (chunk-arrival order).
pub fn write_input_file(path: &Path, pairs: &[MatchedPair]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for pair in pairs {
        writeln!(writer, "{}\t{}", pair.smiles, pair.identifier)?;
    }
    writer.flush()
}
