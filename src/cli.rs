use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::stats::NumericField;

#[derive(Debug, Parser)]
#[command(author, version, about = "Normalize ad-performance exports and surface rule-based findings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve headers, extract metric records, and report rule findings
    Analyze(AnalyzeArgs),
    /// Show how raw headers resolve to canonical metric keys
    Columns(ColumnsArgs),
    /// Summary statistics for one canonical metric across all rows
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input file with one row per ad (.csv, or .json array of objects)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Disable fuzzy header matching (exact alias matches only)
    #[arg(long = "no-fuzzy")]
    pub no_fuzzy: bool,
    /// Emit the full analysis (mapping, records, findings) as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Input file with one row per ad (.csv, or .json array of objects)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Disable fuzzy header matching (exact alias matches only)
    #[arg(long = "no-fuzzy")]
    pub no_fuzzy: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input file with one row per ad (.csv, or .json array of objects)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Canonical numeric field to profile
    #[arg(long, value_enum)]
    pub field: NumericField,
    /// Disable fuzzy header matching (exact alias matches only)
    #[arg(long = "no-fuzzy")]
    pub no_fuzzy: bool,
}
