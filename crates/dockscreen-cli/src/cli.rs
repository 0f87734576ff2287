use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "dockscreen CLI - Orchestrates large-scale virtual screening against a DOCK3-style batch docking pipeline.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen a list of candidate SMILES against a compound library and the docking pipeline.
    Screen(ScreenArgs),
    /// Extract best per-compound scores from a raw OUTDOCK engine log.
    ParseOutdock(ParseOutdockArgs),
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Path to the candidate molecules file (one SMILES per line).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the screening configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path for the output score CSV. Defaults to stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Configuration Overrides ---
    /// Override the compound library CSV from the config file.
    #[arg(long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Override the receptor dockfiles directory.
    #[arg(long, value_name = "PATH")]
    pub dockfiles: Option<PathBuf>,

    /// Override the pipeline scripts directory.
    #[arg(long, value_name = "PATH")]
    pub scripts_dir: Option<PathBuf>,

    /// Override the permanent output directory for archived artifacts.
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Override the root under which staging directories are created.
    #[arg(long, value_name = "PATH")]
    pub staging_root: Option<PathBuf>,

    /// Override the name of the library's identifier column.
    #[arg(long, value_name = "NAME")]
    pub identifier_column: Option<String>,

    /// Override the number of library rows scanned per chunk.
    #[arg(long, value_name = "ROWS")]
    pub chunk_size: Option<usize>,
}

/// Arguments for the `parse-outdock` subcommand.
#[derive(Args, Debug)]
pub struct ParseOutdockArgs {
    /// Path to the OUTDOCK file.
    #[arg(value_name = "PATH")]
    pub outdock: PathBuf,

    /// Path for the `identifier,score` CSV output. Defaults to stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
