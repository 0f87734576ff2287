use crate::cli::ScreenArgs;
use crate::config::FileScreenConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use dockscreen::engine::progress::ProgressReporter;
use dockscreen::workflows::screen::VirtualScreen;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run(args: ScreenArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => FileScreenConfig::from_file(path)?,
        None => FileScreenConfig::default(),
    };
    let config = file_config.merge_with_cli(&args)?;

    let candidates = read_candidates(&args.input)?;
    if candidates.is_empty() {
        return Err(CliError::Argument(format!(
            "no candidate SMILES found in '{}'",
            args.input.display()
        )));
    }
    info!(
        "Loaded {} candidate(s) from {:?}.",
        candidates.len(),
        &args.input
    );

    let mut screen = VirtualScreen::new(config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting virtual screen...");
    let scores = screen.screen(&candidates, &reporter);

    write_scores(args.output.as_deref(), &candidates, &scores)?;

    if let Some(report) = screen.last_report() {
        println!(
            "✓ Screened {} candidate(s): {} matched pair(s), {} duplicate(s) dropped.",
            report.candidates, report.matched_pairs, report.duplicate_pairs
        );
        if report.skipped_result_lines > 0 {
            println!(
                "  Skipped {} malformed result line(s).",
                report.skipped_result_lines
            );
        }
        if !report.missing_identifiers.is_empty() {
            println!(
                "  {} requested identifier(s) never scored.",
                report.missing_identifiers.len()
            );
        }
        if !report.unexpected_identifiers.is_empty() {
            println!(
                "  {} unexpected identifier(s) in the engine output.",
                report.unexpected_identifiers.len()
            );
        }
        println!(
            "  Artifacts archived to: {}",
            screen.config().output_dir.display()
        );
    } else {
        println!("⚠ Screening degraded to an all-missing result; see the log for details.");
    }

    Ok(())
}

/// Reads one candidate SMILES per line; blank lines and `#` comments are
/// skipped, and only the first whitespace-delimited token of each line is
/// taken (`.smi` files often carry a trailing name column).
fn read_candidates(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut candidates = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(token) = trimmed.split_whitespace().next() {
            candidates.push(token.to_string());
        }
    }
    Ok(candidates)
}

fn write_scores(output: Option<&Path>, candidates: &[String], scores: &[f64]) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_score_lines(&mut writer, candidates, scores)?;
            writer.flush()?;
            println!("Scores written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_score_lines(&mut handle, candidates, scores)?;
        }
    }
    Ok(())
}

fn write_score_lines(
    writer: &mut impl Write,
    candidates: &[String],
    scores: &[f64],
) -> std::io::Result<()> {
    for (smiles, score) in candidates.iter().zip(scores) {
        writeln!(writer, "{},{}", smiles, score)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_candidates_takes_first_token_and_skips_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.smi");
        fs::write(&path, "# candidates\nCCO ethanol\n\nc1ccccc1\n").unwrap();

        let candidates = read_candidates(&path).unwrap();

        assert_eq!(candidates, vec!["CCO", "c1ccccc1"]);
    }

    #[test]
    fn score_lines_pair_candidates_with_scores() {
        let candidates = vec!["CCO".to_string(), "CCN".to_string()];
        let scores = vec![-9.5, f64::NAN];
        let mut out = Vec::new();

        write_score_lines(&mut out, &candidates, &scores).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "CCO,-9.5\nCCN,NaN\n");
    }
}
