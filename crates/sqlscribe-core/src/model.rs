//! Transformation records, datasets and workflows
//!
//! Raw rows come from the exporter one per transformation. They are grouped
//! into workflows, then datasets, keeping input order of the SQL texts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Markers a transformation must contain (case-insensitive) to count as SQL
const SQL_MARKERS: [&str; 2] = ["SELECT", "FROM"];

/// Check whether a transformation text looks like SQL.
///
/// Cerner-defined workflows and file uploads export non-SQL text; those rows
/// are skipped during grouping.
pub fn is_good_sql(text: &str) -> bool {
    let upper = text.to_uppercase();
    SQL_MARKERS.iter().all(|marker| upper.contains(marker))
}

/// One raw input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRecord {
    /// Owning workflow name (exact case)
    pub workflow: String,

    /// Dataset mnemonic (exact case from source)
    pub dataset: String,

    /// Opaque version label
    pub version: String,

    /// Opaque last-modified label
    pub date_modified: String,

    /// Transformation text, usually SQL
    pub sql: String,
}

impl TransformationRecord {
    pub fn new(
        workflow: impl Into<String>,
        dataset: impl Into<String>,
        version: impl Into<String>,
        date_modified: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            workflow: workflow.into(),
            dataset: dataset.into(),
            version: version.into(),
            date_modified: date_modified.into(),
            sql: sql.into(),
        }
    }
}

/// A dataset and the transformations that build it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Uppercased dataset name
    pub name: String,

    /// Owning workflow name
    pub workflow: String,

    /// Version label of the first row seen for this dataset
    pub version: String,

    /// Last-modified label of the first row seen for this dataset
    pub date_modified: String,

    /// Transformation texts in input order
    pub transformations: Vec<String>,
}

impl Dataset {
    /// Create a dataset with no transformations yet
    pub fn new(
        name: &str,
        workflow: impl Into<String>,
        version: impl Into<String>,
        date_modified: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_uppercase(),
            workflow: workflow.into(),
            version: version.into(),
            date_modified: date_modified.into(),
            transformations: Vec::new(),
        }
    }

    /// Builder-style helper to attach a transformation
    pub fn with_transformation(mut self, sql: impl Into<String>) -> Self {
        self.transformations.push(sql.into());
        self
    }
}

/// A named group of datasets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,

    /// Datasets keyed by uppercased name
    pub datasets: BTreeMap<String, Dataset>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasets: BTreeMap::new(),
        }
    }
}

/// All workflows of one run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Workflows keyed by name
    pub workflows: BTreeMap<String, Workflow>,

    /// Workflow names in order of first appearance in the input
    #[serde(default)]
    pub workflow_order: Vec<String>,

    /// Every dataset name seen in the input, valid SQL or not (exact case)
    pub dataset_names: BTreeSet<String>,

    /// Rows dropped because their text is not SQL
    pub skipped_rows: usize,
}

impl Catalog {
    /// Group raw rows by workflow and dataset.
    ///
    /// Non-SQL rows are skipped one by one; their dataset names are still
    /// recorded in `dataset_names`.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TransformationRecord>,
    {
        let mut catalog = Catalog::default();

        for record in records {
            catalog.dataset_names.insert(record.dataset.clone());

            if !is_good_sql(&record.sql) {
                catalog.skipped_rows += 1;
                continue;
            }

            if !catalog.workflows.contains_key(&record.workflow) {
                catalog.workflow_order.push(record.workflow.clone());
            }

            let workflow = catalog
                .workflows
                .entry(record.workflow.clone())
                .or_insert_with(|| Workflow::new(record.workflow.clone()));

            workflow
                .datasets
                .entry(record.dataset.to_uppercase())
                .or_insert_with(|| {
                    Dataset::new(
                        &record.dataset,
                        record.workflow.clone(),
                        record.version.clone(),
                        record.date_modified.clone(),
                    )
                })
                .transformations
                .push(record.sql);
        }

        catalog
    }

    /// Workflows in input order
    pub fn workflows_in_order(&self) -> impl DoubleEndedIterator<Item = &Workflow> {
        self.workflow_order
            .iter()
            .filter_map(|name| self.workflows.get(name))
    }

    /// Iterate over every dataset, workflows in input order
    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.workflows_in_order().flat_map(|w| w.datasets.values())
    }

    /// Number of grouped datasets (collisions across workflows counted once each)
    pub fn dataset_count(&self) -> usize {
        self.workflows.values().map(|w| w.datasets.len()).sum()
    }

    /// Find a dataset by name (case-insensitive). On collisions the workflow
    /// appearing last in the input wins.
    pub fn get_dataset(&self, name: &str) -> Option<&Dataset> {
        let key = name.to_uppercase();
        self.workflows_in_order()
            .rev()
            .find_map(|w| w.datasets.get(&key))
    }

    /// Workflow owning a dataset (case-insensitive)
    pub fn workflow_of(&self, dataset: &str) -> Option<&str> {
        self.get_dataset(dataset).map(|d| d.workflow.as_str())
    }

    /// Dataset names grouped under more than one workflow
    pub fn collisions(&self) -> BTreeMap<String, Vec<String>> {
        let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for dataset in self.datasets() {
            owners
                .entry(dataset.name.clone())
                .or_default()
                .push(dataset.workflow.clone());
        }
        owners.retain(|_, workflows| workflows.len() > 1);
        owners
    }
}
