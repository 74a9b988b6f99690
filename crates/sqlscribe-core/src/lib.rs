//! sqlscribe core
//!
//! Domain model shared by every sqlscribe crate:
//! - Raw transformation rows and their grouping into workflows/datasets
//! - The SELECT/FROM validity check applied before grouping
//! - Configuration (sqlscribe.toml)
//! - Run summary returned by the pipeline

pub mod model;
pub mod config;
pub mod report;

pub use model::{TransformationRecord, Dataset, Workflow, Catalog, is_good_sql};
pub use config::{Config, ConfigError, InputConfig, OutputConfig};
pub use report::{RunSummary, ReportError, format_elapsed};
