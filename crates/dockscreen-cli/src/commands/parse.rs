use crate::cli::ParseOutdockArgs;
use crate::error::{CliError, Result};
use dockscreen::core::io::outdock::parse_outdock_file;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: ParseOutdockArgs) -> Result<()> {
    info!("Parsing OUTDOCK log {:?}.", &args.outdock);
    let scores = parse_outdock_file(&args.outdock).map_err(|e| CliError::FileParsing {
        path: args.outdock.clone(),
        source: e.into(),
    })?;
    info!("Extracted best scores for {} identifier(s).", scores.len());

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            scores.write_csv(&mut writer)?;
            writer.flush()?;
            println!("Results written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            scores.write_csv(&mut handle)?;
        }
    }
    Ok(())
}
