//! File formats around the dependency core
//!
//! - Reading the transformation export and the auxiliary table-name list (CSV)
//! - Writing dependency maps as JSON
//! - Writing flattened dependency rows as spreadsheets (CSV)

pub mod reader;
pub mod writer;

pub use reader::{load_transformations, load_table_names, read_transformations, read_table_names, ReadError};
pub use writer::{write_dependency_json, write_dependency_sheet, WriteError};
