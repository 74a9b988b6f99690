//! Flat export rows
//!
//! Shapes a dependency map into `(workflow, dataset, dependency)` rows for the
//! spreadsheet and JSON writers.

use serde::{Deserialize, Serialize};
use sqlscribe_core::Catalog;
use std::collections::{BTreeMap, HashMap};

use crate::DependencyMap;

/// Workflow reported for datasets with no known owner
pub const UNKNOWN_WORKFLOW: &str = "UNKNOWN";

/// Resolve the workflow that owns a dataset
pub trait WorkflowLookup {
    fn workflow_of(&self, dataset: &str) -> Option<&str>;
}

impl WorkflowLookup for Catalog {
    fn workflow_of(&self, dataset: &str) -> Option<&str> {
        Catalog::workflow_of(self, dataset)
    }
}

impl WorkflowLookup for HashMap<String, String> {
    fn workflow_of(&self, dataset: &str) -> Option<&str> {
        self.get(dataset).map(String::as_str)
    }
}

impl WorkflowLookup for BTreeMap<String, String> {
    fn workflow_of(&self, dataset: &str) -> Option<&str> {
        self.get(dataset).map(String::as_str)
    }
}

/// One exported dependency edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyRow {
    #[serde(rename = "WORKFLOW_NAME")]
    pub workflow: String,

    #[serde(rename = "DATA_SET_MNEMONIC")]
    pub dataset: String,

    #[serde(rename = "DEPENDENCY")]
    pub dependency: String,
}

/// One row per (dataset, dependency) pair, in map then set iteration order
pub fn flatten<L>(map: &DependencyMap, lookup: &L) -> Vec<DependencyRow>
where
    L: WorkflowLookup + ?Sized,
{
    let mut rows = Vec::new();

    for (dataset, dependencies) in map {
        let workflow = lookup.workflow_of(dataset).unwrap_or(UNKNOWN_WORKFLOW);
        for dependency in dependencies {
            rows.push(DependencyRow {
                workflow: workflow.to_string(),
                dataset: dataset.clone(),
                dependency: dependency.clone(),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlscribe_core::TransformationRecord;

    fn row(workflow: &str, dataset: &str, dependency: &str) -> DependencyRow {
        DependencyRow {
            workflow: workflow.to_string(),
            dataset: dataset.to_string(),
            dependency: dependency.to_string(),
        }
    }

    #[test]
    fn one_row_per_dependency() {
        let mut map = DependencyMap::new();
        map.insert("DS1".to_string(), ["DEP1", "DEP2"].iter().map(|s| s.to_string()).collect());

        let lookup: HashMap<String, String> = [("DS1".to_string(), "WF1".to_string())].into();
        let mut rows = flatten(&map, &lookup);
        rows.sort();

        assert_eq!(rows, vec![row("WF1", "DS1", "DEP1"), row("WF1", "DS1", "DEP2")]);
    }

    #[test]
    fn unknown_workflow_fallback() {
        let mut map = DependencyMap::new();
        map.insert("ORPHAN".to_string(), ["X".to_string()].into());

        let rows = flatten(&map, &BTreeMap::<String, String>::new());

        assert_eq!(rows, vec![row(UNKNOWN_WORKFLOW, "ORPHAN", "X")]);
    }

    #[test]
    fn datasets_without_dependencies_emit_nothing() {
        let mut map = DependencyMap::new();
        map.insert("LEAF".to_string(), Default::default());

        assert!(flatten(&map, &BTreeMap::<String, String>::new()).is_empty());
    }

    #[test]
    fn catalog_is_a_lookup() {
        let catalog = Catalog::from_records(vec![TransformationRecord::new(
            "Finance", "orders", "1", "d", "SELECT * FROM raw",
        )]);
        let mut map = DependencyMap::new();
        map.insert("ORDERS".to_string(), ["RAW".to_string()].into());

        assert_eq!(flatten(&map, &catalog), vec![row("Finance", "ORDERS", "RAW")]);
    }
}
