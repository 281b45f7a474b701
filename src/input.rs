//! Row loading for the CLI: CSV and JSON batches into in-memory rows.
//!
//! CSV cells come in as strings; the extractor's coercions decide what is
//! numeric. JSON input must be an array of flat objects. Dispatch is by file
//! extension, defaulting to CSV.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::record::Row;

pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json_rows(path),
        _ => load_csv_rows(path),
    }
}

fn load_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Opening CSV input {path:?}"))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Reading headers from {path:?}"))?
        .clone();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Reading row {} in {path:?}", idx + 2))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn load_json_rows(path: &Path) -> Result<Vec<Row>> {
    let file = File::open(path).with_context(|| format!("Opening JSON input {path:?}"))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing JSON input {path:?}"))?;
    let Value::Array(items) = value else {
        bail!("JSON input {path:?} must be an array of row objects");
    };
    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(row) => rows.push(row),
            other => bail!(
                "JSON row {idx} in {path:?} must be an object, found {}",
                json_kind(&other)
            ),
        }
    }
    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
