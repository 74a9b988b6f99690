//! Dependency graph construction and traversal
//!
//! Builds forward and reverse edges from a direct dependency map for impact
//! analysis ("what breaks if this dataset changes").

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::DependencyMap;

/// Dependency graph with forward and reverse edges
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Forward edges: dataset -> names it reads from
    dependencies: BTreeMap<String, BTreeSet<String>>,

    /// Reverse edges: name -> datasets that read from it
    dependents: BTreeMap<String, BTreeSet<String>>,

    /// All datasets and dependency names in the graph
    nodes: BTreeSet<String>,
}

impl DependencyGraph {
    /// Build a graph from a direct dependency map.
    ///
    /// Self matches (a dataset whose own name appears in its SQL) are not
    /// edges.
    pub fn from_map(direct: &DependencyMap) -> Self {
        let mut graph = DependencyGraph::default();

        for (dataset, deps) in direct {
            graph.nodes.insert(dataset.clone());

            for dep in deps.iter().filter(|d| *d != dataset) {
                graph.nodes.insert(dep.clone());
                graph
                    .dependencies
                    .entry(dataset.clone())
                    .or_default()
                    .insert(dep.clone());
                graph
                    .dependents
                    .entry(dep.clone())
                    .or_default()
                    .insert(dataset.clone());
            }
        }

        graph
    }

    /// Get all nodes in the graph
    pub fn all_nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Immediate dependencies of a dataset
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        self.dependencies
            .get(name)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Immediate dependents of a dataset
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.dependents
            .get(name)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All datasets that transitively depend on `name`, nearest first.
    ///
    /// This is the "blast radius": everything affected if `name` changes.
    pub fn downstream(&self, name: &str) -> Vec<String> {
        Self::walk(&self.dependents, name)
    }

    /// All names `name` transitively depends on, nearest first
    pub fn upstream(&self, name: &str) -> Vec<String> {
        Self::walk(&self.dependencies, name)
    }

    /// Check if `target` is reachable downstream of `source`
    pub fn has_path(&self, source: &str, target: &str) -> bool {
        self.downstream(source).iter().any(|n| n == target)
    }

    /// Breadth-first walk over one edge direction, excluding the start node
    fn walk(edges: &BTreeMap<String, BTreeSet<String>>, start: &str) -> Vec<String> {
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut result = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let Some(next) = edges.get(current) else {
                continue;
            };

            for node in next {
                if visited.insert(node.as_str()) {
                    result.push(node.clone());
                    queue.push_back(node.as_str());
                }
            }
        }

        result
    }

    /// Topological order, dependencies first. `None` if the graph has a cycle.
    pub fn topological_sort(&self) -> Option<Vec<String>> {
        let mut in_degree: HashMap<&str, usize> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), self.dependencies.get(n).map_or(0, BTreeSet::len)))
            .collect();

        // Kahn's algorithm over nodes in name order
        let mut queue: VecDeque<&str> = self
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|n| in_degree.get(n) == Some(&0))
            .collect();
        let mut result = Vec::new();

        while let Some(node) = queue.pop_front() {
            result.push(node.to_string());

            if let Some(children) = self.dependents.get(node) {
                for child in children {
                    if let Some(degree) = in_degree.get_mut(child.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(child.as_str());
                        }
                    }
                }
            }
        }

        // Check if all nodes were visited (no cycles)
        if result.len() == self.nodes.len() {
            Some(result)
        } else {
            None
        }
    }
}
