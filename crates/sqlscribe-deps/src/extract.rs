//! Direct dependency extraction
//!
//! A candidate name is a direct dependency of a dataset when it appears as a
//! plain substring of any of the dataset's uppercased transformation texts.
//! There is no tokenizing and no word-boundary check: `ORDERS` matches inside
//! `ORDERS_ARCHIVE`. Existing exports rely on this exact behaviour.

use rayon::prelude::*;
use sqlscribe_core::{Catalog, Dataset};
use std::collections::BTreeSet;

use crate::universe::NameUniverse;
use crate::DependencyMap;

/// Placeholder values from the source data that are never real dependencies
const EXCLUDED_VALUES: [&str; 4] = ["", "\t", "\t\t\t", "CATEGORY"];

/// Check that a candidate is not blank or a known placeholder
pub fn is_clean_dependency(value: &str) -> bool {
    !EXCLUDED_VALUES.contains(&value.trim())
}

/// Candidates from the universe found in any transformation of the dataset
pub fn extract_direct(dataset: &Dataset, universe: &NameUniverse) -> BTreeSet<String> {
    let mut dependencies = BTreeSet::new();

    for transformation in &dataset.transformations {
        let upper = transformation.to_uppercase();
        for candidate in universe.iter() {
            if upper.contains(candidate) && is_clean_dependency(candidate) {
                dependencies.insert(candidate.to_string());
            }
        }
    }

    dependencies
}

/// Direct dependency map for every dataset in the catalog.
///
/// Datasets are scanned in parallel. When the same dataset name is grouped
/// under several workflows, the workflow appearing last in the input wins.
pub fn extract_direct_map(catalog: &Catalog, universe: &NameUniverse) -> DependencyMap {
    let datasets: Vec<&Dataset> = catalog.datasets().collect();

    let extracted: Vec<(String, BTreeSet<String>)> = datasets
        .par_iter()
        .map(|dataset| (dataset.name.clone(), extract_direct(dataset, universe)))
        .collect();

    let mut map = DependencyMap::new();
    for (name, dependencies) in extracted {
        map.insert(name, dependencies);
    }
    map
}
