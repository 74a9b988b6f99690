//! Run summary
//!
//! Counters and timing for one pipeline run. Returned by value from the
//! pipeline; nothing here is global.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Summary statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Workflows with at least one SQL transformation
    pub workflows: usize,

    /// Datasets with dependency entries
    pub datasets: usize,

    /// Non-SQL rows skipped while grouping
    pub skipped_rows: usize,

    /// Candidate names considered during matching
    pub universe_size: usize,

    /// Per-dataset documents written
    pub documents_written: usize,

    /// Dependency JSON files written
    pub json_files: usize,

    /// Dependency spreadsheets written
    pub spreadsheet_files: usize,

    /// Wall-clock time of the run in seconds
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            workflows: 0,
            datasets: 0,
            skipped_rows: 0,
            universe_size: 0,
            documents_written: 0,
            json_files: 0,
            spreadsheet_files: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs.max(0.0))
    }

    /// Human-readable completion message
    pub fn message(&self) -> String {
        format!(
            "Done! Created {} documents, {} JSON files and {} spreadsheets in {}",
            self.documents_written,
            self.json_files,
            self.spreadsheet_files,
            format_elapsed(self.elapsed()),
        )
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Report error types
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as "M minutes and S seconds"
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;

    match minutes {
        0 => format!("{} seconds", seconds),
        1 => format!("1 minute and {} seconds", seconds),
        _ => format!("{} minutes and {} seconds", minutes, seconds),
    }
}
