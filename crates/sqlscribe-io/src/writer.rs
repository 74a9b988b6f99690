//! Dependency exports
//!
//! JSON: `{ "DATASET": ["DEP", ...] }`, four-space indented.
//! Spreadsheet: CSV with a `WORKFLOW_NAME,DATA_SET_MNEMONIC,DEPENDENCY` header.

use serde::Serialize;
use sqlscribe_deps::{DependencyMap, DependencyRow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Spreadsheet header, written even when there are no rows
const SHEET_HEADERS: [&str; 3] = ["WORKFLOW_NAME", "DATA_SET_MNEMONIC", "DEPENDENCY"];

/// Errors that can occur when writing exports
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write a dependency map as pretty-printed JSON
pub fn write_dependency_json(path: &Path, map: &DependencyMap) -> Result<(), WriteError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, map)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), datasets = map.len(), "exported dependency JSON");
    Ok(())
}

fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> Result<(), WriteError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Write flattened dependency rows as a CSV spreadsheet
pub fn write_dependency_sheet(path: &Path, rows: &[DependencyRow]) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(SHEET_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = rows.len(), "exported dependency spreadsheet");
    Ok(())
}
