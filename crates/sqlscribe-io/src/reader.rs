//! CSV input
//!
//! `transformations.csv`: header row, then exactly five columns per row
//! (workflow, dataset, version, date modified, transformation text).
//! `table_names.csv`: header row, table name in the first column.

use sqlscribe_core::TransformationRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Number of columns in the transformation export
const TRANSFORMATION_FIELDS: usize = 5;

/// Errors that can occur when reading input files
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Input file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Malformed record on line {line}: expected 5 fields, found {fields}")]
    MalformedRecord { line: u64, fields: usize },
}

fn open(path: &Path) -> Result<BufReader<File>, ReadError> {
    if !path.exists() {
        return Err(ReadError::MissingFile(path.to_path_buf()));
    }
    Ok(BufReader::new(File::open(path)?))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Parse transformation rows from any reader
pub fn read_transformations<R: Read>(reader: R) -> Result<Vec<TransformationRecord>, ReadError> {
    let mut csv_reader = csv_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;

        if row.len() != TRANSFORMATION_FIELDS {
            return Err(ReadError::MalformedRecord {
                line: row.position().map_or(0, |p| p.line()),
                fields: row.len(),
            });
        }

        records.push(TransformationRecord::new(&row[0], &row[1], &row[2], &row[3], &row[4]));
    }

    Ok(records)
}

/// Parse auxiliary table names from any reader
pub fn read_table_names<R: Read>(reader: R) -> Result<Vec<String>, ReadError> {
    let mut csv_reader = csv_reader(reader);
    let mut names = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        if let Some(name) = row.get(0) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Load the transformation export from a file
pub fn load_transformations(path: &Path) -> Result<Vec<TransformationRecord>, ReadError> {
    let records = read_transformations(open(path)?)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "loaded transformations");
    Ok(records)
}

/// Load the auxiliary table-name list from a file
pub fn load_table_names(path: &Path) -> Result<Vec<String>, ReadError> {
    let names = read_table_names(open(path)?)?;
    tracing::debug!(path = %path.display(), names = names.len(), "loaded table names");
    Ok(names)
}
