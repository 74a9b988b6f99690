//! Batch pipeline
//!
//! load -> group -> universe -> direct map -> full map -> exports -> documents.
//! The whole run completes in memory before anything is written; any failure
//! aborts the run.

use sqlscribe_core::{Catalog, Config, RunSummary, TransformationRecord};
use sqlscribe_deps::{
    build_universe, extract_direct_map, flatten, resolve_full_map, DependencyGraph, DependencyMap,
    NameUniverse,
};
use sqlscribe_io::{
    load_table_names, load_transformations, write_dependency_json, write_dependency_sheet,
    ReadError, WriteError,
};
use sqlscribe_render::{DocumentRenderer, RenderError};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

/// Output file names, relative to the output directory
pub mod output_files {
    pub const DIRECT_JSON: &str = "direct_dependencies.json";
    pub const FULL_JSON: &str = "full_dataset_dependencies.json";
    pub const DIRECT_SHEET: &str = "direct_dependencies.csv";
    pub const FULL_SHEET: &str = "full_dependencies.csv";
}

/// Pipeline error types
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read input: {0}")]
    Read(#[from] ReadError),

    #[error("Failed to write export: {0}")]
    Write(#[from] WriteError),

    #[error("Failed to render document: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved dependencies for one run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub catalog: Catalog,
    pub universe: NameUniverse,
    pub direct: DependencyMap,
    pub full: DependencyMap,
}

impl Analysis {
    /// Group rows and resolve both dependency maps
    pub fn from_records(records: Vec<TransformationRecord>, table_names: Vec<String>) -> Self {
        let catalog = Catalog::from_records(records);
        if catalog.skipped_rows > 0 {
            tracing::warn!(rows = catalog.skipped_rows, "skipped transformations without SQL");
        }
        for (dataset, workflows) in catalog.collisions() {
            tracing::warn!(%dataset, ?workflows, "dataset grouped under several workflows, last one wins");
        }

        let universe = build_universe(&catalog.dataset_names, &table_names);
        tracing::debug!(candidates = universe.len(), "built name universe");

        let direct = extract_direct_map(&catalog, &universe);
        tracing::info!("Identified dependencies for {} datasets.", direct.len());

        let full = resolve_full_map(&direct);

        Self { catalog, universe, direct, full }
    }

    /// Load the configured input files and resolve dependencies
    pub fn load(config: &Config) -> Result<Self, PipelineError> {
        let records = load_transformations(&config.transformations_path())?;
        let table_names = load_table_names(&config.table_names_path())?;
        Ok(Self::from_records(records, table_names))
    }

    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::from_map(&self.direct)
    }

    /// Direct dependencies of a dataset (case-insensitive), if it was analyzed
    pub fn direct_of(&self, dataset: &str) -> Option<&BTreeSet<String>> {
        self.direct.get(&dataset.to_uppercase())
    }

    /// Full dependencies of a dataset (case-insensitive), if it was analyzed
    pub fn full_of(&self, dataset: &str) -> Option<&BTreeSet<String>> {
        self.full.get(&dataset.to_uppercase())
    }
}

/// Full export run driven by a config
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole batch and report what was produced
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();
        let analysis = Analysis::load(&self.config)?;
        let mut summary = self.write_outputs(&analysis)?;
        summary.set_elapsed(started.elapsed());

        tracing::info!("{}", summary.message());
        Ok(summary)
    }

    /// Write every enabled output for an already resolved analysis
    pub fn write_outputs(&self, analysis: &Analysis) -> Result<RunSummary, PipelineError> {
        let out_dir = self.config.output_dir();
        std::fs::create_dir_all(&out_dir)
            .map_err(|source| PipelineError::OutputDir { path: out_dir.clone(), source })?;

        let mut summary = RunSummary::new();
        summary.workflows = analysis.catalog.workflows.len();
        summary.datasets = analysis.direct.len();
        summary.skipped_rows = analysis.catalog.skipped_rows;
        summary.universe_size = analysis.universe.len();

        if self.config.output.json {
            write_dependency_json(&out_dir.join(output_files::DIRECT_JSON), &analysis.direct)?;
            write_dependency_json(&out_dir.join(output_files::FULL_JSON), &analysis.full)?;
            summary.json_files = 2;
        }

        if self.config.output.spreadsheets {
            let direct_rows = flatten(&analysis.direct, &analysis.catalog);
            write_dependency_sheet(&out_dir.join(output_files::DIRECT_SHEET), &direct_rows)?;

            let full_rows = flatten(&analysis.full, &analysis.catalog);
            write_dependency_sheet(&out_dir.join(output_files::FULL_SHEET), &full_rows)?;
            summary.spreadsheet_files = 2;
        }

        if self.config.output.documents {
            summary.documents_written = write_documents(&out_dir, analysis)?;
        }

        Ok(summary)
    }
}

fn write_documents(out_dir: &std::path::Path, analysis: &Analysis) -> Result<usize, PipelineError> {
    let renderer = DocumentRenderer::new()?;
    let empty = BTreeSet::new();
    let mut written = 0;

    for workflow in analysis.catalog.workflows_in_order() {
        tracing::info!("Processing workflow: {}", workflow.name);

        for dataset in workflow.datasets.values() {
            let direct = analysis.direct.get(&dataset.name).unwrap_or(&empty);
            let full = analysis.full.get(&dataset.name).unwrap_or(&empty);

            let path = renderer.write(out_dir, dataset, direct, full)?;
            written += 1;
            tracing::info!("Saved document for dataset {} at {}", dataset.name, path.display());
        }
    }

    Ok(written)
}
