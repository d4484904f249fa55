//! Top-level argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::commands::candidates::CandidatesArgs;
use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::normalize::NormalizeArgs;
use crate::cli::commands::scan::ScanArgs;

#[derive(Parser, Debug)]
#[command(
    name = "brickyard",
    version,
    about = "Find which sets a parts inventory can build, exactly or with color substitutions"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize an inventory payload and print the indexed result
    Normalize(NormalizeArgs),

    /// List sets whose piece count fits the inventory
    Candidates(CandidatesArgs),

    /// Check whether a single set can be built
    Check(CheckArgs),

    /// Scan a catalog for buildable sets
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// More log output on stderr (repeatable)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// TSV for lists, YAML for single results
    #[default]
    Auto,
    Json,
    Yaml,
    Tsv,
    Csv,
    Table,
}
