use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spdx-convert")]
#[command(version, about = "Convert legacy copyright headers to SPDX", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Convert @copyright/@license headers to SPDX and append AUTHORS.md
    #[command(after_help = "Run the script with --dry-run until all files can be converted.\n\
Otherwise the author list can not be generated correctly.")]
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// The default file copyright text. Example: "Free Software Foundation Europe e.V. <https://fsfe.org>"
    pub default_file_copyright: String,

    /// The path to process
    pub path: PathBuf,

    /// Only report what would change, never write
    #[arg(long)]
    pub dry_run: bool,

    /// Directories to ignore (repeatable)
    #[arg(short = 'i', long = "ignore-dir", value_name = "DIR")]
    pub ignore_dirs: Vec<String>,

    /// Copyright holders whose attribution is kept as is. Example: "OldCompanyName"
    #[arg(short = 'p', long = "preserve-spdx", value_name = "HOLDER")]
    pub preserve_spdx: Vec<String>,

    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Summary file (if not specified, writes to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table output for terminal
    Terminal,
    /// JSON format
    Json,
}
