//! sqlscribe engine - run orchestration
//!
//! This crate ties the pieces together:
//! - Loading the transformation export and table-name list
//! - Resolving direct and full dependencies
//! - Writing JSON, spreadsheet and document outputs
//! - Returning a run summary

pub mod pipeline;

pub use pipeline::{Analysis, Pipeline, PipelineError, output_files};
