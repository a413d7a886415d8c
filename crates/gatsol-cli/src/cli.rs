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
    author = "GATSol Benchmark Maintainers",
    version,
    about = "gatsolkit - Runs the GATSol solubility predictor on a FASTA batch and writes a standardized benchmarking table.",
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
    /// Predict solubility for every sequence of a FASTA file using the GATSol pipeline.
    Predict(PredictArgs),
    /// Drop coordinate records of one chain beyond a maximum residue number.
    Truncate(TruncateArgs),
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Input FASTA file; every identifier needs a matching structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Destination of the standardized CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub out: PathBuf,

    /// Installation root of the GATSol pipeline [default: Predict]
    #[arg(long = "predict-dir", alias = "predict_dir", value_name = "PATH")]
    pub predict_dir: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Kill the pipeline and fail the run if it takes longer than this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Extension of the structure files (default 'pdb').
    #[arg(long = "structure-ext", value_name = "EXT")]
    pub structure_extension: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S pipeline.timeout-secs=600
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `truncate` subcommand.
#[derive(Args, Debug)]
pub struct TruncateArgs {
    /// Input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Highest residue number to keep in the selected chain.
    #[arg(short = 'n', long, required = true, value_name = "INT")]
    pub max_residues: i32,

    /// Chain identifier to truncate.
    #[arg(long, required = true, value_name = "CHAR")]
    pub chain: char,
}
