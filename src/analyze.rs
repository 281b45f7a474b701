//! Request boundary for the resolve → extract → rule-check pipeline.
//!
//! Callers hand over an in-memory batch of rows; everything past the
//! non-empty precondition is a deterministic transform with no I/O. The
//! resulting [`Analysis`] carries the header mapping (for caller metadata),
//! the normalized records, and the baseline findings in row order.

use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::error::InsightError;
use crate::record::{MetricRecord, Row, extract_records};
use crate::resolve::{HeaderMapping, resolve_headers};
use crate::rules::{Finding, generate_findings};

/// Knobs for one batch analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Fall back to similarity matching for headers no alias matches exactly.
    pub fuzzy_match: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions { fuzzy_match: true }
    }
}

/// Output of one batch analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub resolved_columns: HeaderMapping,
    pub records: Vec<MetricRecord>,
    pub findings: Vec<Finding>,
}

/// Run the full pipeline over one batch of rows.
///
/// Fails with [`InsightError::InvalidPayload`] when `rows` is empty; every
/// other data problem degrades to absent fields rather than an error.
pub fn analyze(rows: &[Row], options: &AnalysisOptions) -> Result<Analysis, InsightError> {
    if rows.is_empty() {
        return Err(InsightError::InvalidPayload);
    }
    let headers = observed_headers(rows);
    debug!("Observed {} distinct header(s)", headers.len());
    let resolved_columns = resolve_headers(&headers, options.fuzzy_match);
    let records = extract_records(rows, &resolved_columns);
    let findings = generate_findings(&records)?;
    Ok(Analysis {
        resolved_columns,
        records,
        findings,
    })
}

/// Distinct headers across the batch, in first-observed order.
pub fn observed_headers(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.keys())
        .unique()
        .cloned()
        .collect()
}
