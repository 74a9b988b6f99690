//! Full (transitive) dependency resolution

use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::DependencyMap;

/// Every dataset reachable from `dataset` through direct dependency edges.
///
/// Iterative depth-first traversal; the visited set is seeded with the
/// starting dataset, which guarantees termination on cycles. Names missing
/// from `direct` have no further dependencies. The starting dataset is never
/// part of the result.
pub fn resolve_full(dataset: &str, direct: &DependencyMap) -> BTreeSet<String> {
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut stack: Vec<&str> = vec![dataset];
    visited.insert(dataset.to_string());

    while let Some(current) = stack.pop() {
        let Some(dependencies) = direct.get(current) else {
            continue;
        };

        for dependency in dependencies {
            if visited.insert(dependency.clone()) {
                stack.push(dependency.as_str());
            }
        }
    }

    visited.remove(dataset);
    visited
}

/// Full dependency map: `resolve_full` for every key of the direct map.
///
/// Each dataset is resolved independently against the read-only direct map.
pub fn resolve_full_map(direct: &DependencyMap) -> DependencyMap {
    direct
        .par_iter()
        .map(|(dataset, _)| (dataset.clone(), resolve_full(dataset, direct)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(entries: &[(&str, &[&str])]) -> DependencyMap {
        entries
            .iter()
            .map(|(k, deps)| (k.to_string(), deps.iter().map(|d| d.to_string()).collect()))
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn follows_chains() {
        let direct = map(&[("A", &["B"]), ("B", &["C"]), ("C", &["D", "E"])]);

        assert_eq!(resolve_full("A", &direct), set(&["B", "C", "D", "E"]));
        assert_eq!(resolve_full("C", &direct), set(&["D", "E"]));
    }

    #[test]
    fn two_node_cycle_terminates() {
        let direct = map(&[("A", &["B"]), ("B", &["A"])]);

        assert_eq!(resolve_full("A", &direct), set(&["B"]));
        assert_eq!(resolve_full("B", &direct), set(&["A"]));
    }

    #[test]
    fn longer_cycle_and_self_edge() {
        let direct = map(&[("A", &["A", "B"]), ("B", &["C"]), ("C", &["A"])]);

        assert_eq!(resolve_full("A", &direct), set(&["B", "C"]));
        assert_eq!(resolve_full("C", &direct), set(&["A", "B"]));
    }

    #[test]
    fn missing_key_is_a_leaf() {
        let direct = map(&[("A", &["B"])]);

        assert_eq!(resolve_full("A", &direct), set(&["B"]));
        assert!(resolve_full("B", &direct).is_empty());
    }

    #[test]
    fn diamond_is_reported_once() {
        let direct = map(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);

        assert_eq!(resolve_full("A", &direct), set(&["B", "C", "D"]));
    }

    #[test]
    fn full_map_is_superset_of_direct_without_self() {
        let direct = map(&[
            ("A", &["A", "B"]),
            ("B", &["C"]),
            ("C", &["B"]),
            ("D", &[]),
        ]);

        let full = resolve_full_map(&direct);

        assert_eq!(full.len(), direct.len());
        for (dataset, deps) in &direct {
            let closure = &full[dataset];
            assert!(!closure.contains(dataset));
            for dep in deps.iter().filter(|d| *d != dataset) {
                assert!(closure.contains(dep));
            }
        }
        assert!(full["D"].is_empty());
    }

    #[test]
    fn resolution_is_repeatable() {
        let direct = map(&[("A", &["B"]), ("B", &["C", "A"])]);

        assert_eq!(resolve_full("A", &direct), resolve_full("A", &direct));
        assert_eq!(resolve_full_map(&direct), resolve_full_map(&direct));
    }
}
