//! Canonical metric normalization and rule-based findings for advertising
//! performance exports.
//!
//! The pipeline maps vendor-specific column headers onto a fixed canonical
//! schema (exact alias match first, fuzzy similarity second), extracts one
//! normalized [`record::MetricRecord`] per row with derived KPIs, and runs a
//! deterministic rule table that emits baseline [`rules::Finding`]s. The
//! [`analyze`] module is the library entry point; the CLI in [`run`] is a
//! thin driver over files.

pub mod analyze;
pub mod cli;
pub mod error;
pub mod formula;
pub mod input;
pub mod record;
pub mod resolve;
pub mod rules;
pub mod schema;
pub mod stats;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::analyze::AnalysisOptions;
use crate::cli::{AnalyzeArgs, Cli, ColumnsArgs, Commands, StatsArgs};
use crate::resolve::HeaderMapping;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("insight_metrics", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => handle_analyze(&args),
        Commands::Columns(args) => handle_columns(&args),
        Commands::Stats(args) => handle_stats(&args),
    }
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    let rows = input::load_rows(&args.input)?;
    let options = AnalysisOptions {
        fuzzy_match: !args.no_fuzzy,
    };
    let analysis = analyze::analyze(&rows, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_mapping(&analysis.resolved_columns);
        println!();
        let headers = vec![
            "label".to_string(),
            "priority".to_string(),
            "confidence".to_string(),
            "summary".to_string(),
        ];
        let rows: Vec<Vec<String>> = analysis
            .findings
            .iter()
            .map(|finding| {
                vec![
                    finding.label.clone(),
                    format!("{:?}", finding.recommendation.priority).to_lowercase(),
                    format!("{:.2}", finding.confidence),
                    finding.recommendation.summary.clone(),
                ]
            })
            .collect();
        table::print_table(&headers, &rows);
    }
    info!(
        "Extracted {} record(s) and {} finding(s) from {:?}",
        analysis.records.len(),
        analysis.findings.len(),
        args.input
    );
    Ok(())
}

fn handle_columns(args: &ColumnsArgs) -> Result<()> {
    let rows = input::load_rows(&args.input)?;
    let headers = analyze::observed_headers(&rows);
    let mapping = resolve::resolve_headers(&headers, !args.no_fuzzy);
    print_mapping(&mapping);
    info!(
        "Resolved {} of {} canonical key(s) from {:?}",
        mapping.len(),
        schema::CanonicalKey::ALL.len(),
        args.input
    );
    Ok(())
}

fn handle_stats(args: &StatsArgs) -> Result<()> {
    let rows = input::load_rows(&args.input)?;
    let options = AnalysisOptions {
        fuzzy_match: !args.no_fuzzy,
    };
    let analysis = analyze::analyze(&rows, &options)?;
    let field_stats = stats::compute_field_stats(&analysis.records, args.field);

    let headers = vec![
        "mean".to_string(),
        "median".to_string(),
        "std_dev".to_string(),
        "min".to_string(),
        "max".to_string(),
    ];
    let row = vec![
        format_stat(field_stats.mean),
        format_stat(field_stats.median),
        format_stat(field_stats.std_dev),
        format_stat(field_stats.min),
        format_stat(field_stats.max),
    ];
    table::print_table(&headers, &[row]);
    info!(
        "Computed summary statistics over {} record(s) from {:?}",
        analysis.records.len(),
        args.input
    );
    Ok(())
}

fn print_mapping(mapping: &HeaderMapping) {
    let headers = vec!["canonical_key".to_string(), "source_header".to_string()];
    let rows: Vec<Vec<String>> = mapping
        .iter()
        .map(|(key, header)| vec![key.to_string(), header.clone()])
        .collect();
    table::print_table(&headers, &rows);
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.4}"),
        None => String::new(),
    }
}
