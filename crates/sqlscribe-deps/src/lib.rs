//! Dataset dependency resolution
//!
//! This crate handles:
//! - Building the universe of candidate table/dataset names
//! - Extracting direct dependencies by substring matching
//! - Computing full (transitive) dependencies
//! - Shaping dependency maps into flat export rows
//! - Upstream/downstream queries over the dependency graph

pub mod universe;
pub mod extract;
pub mod closure;
pub mod export;
pub mod graph;

use std::collections::{BTreeMap, BTreeSet};

/// Dataset name -> dependency names (direct or full variant)
pub type DependencyMap = BTreeMap<String, BTreeSet<String>>;

pub use universe::{NameUniverse, build_universe};
pub use extract::{extract_direct, extract_direct_map, is_clean_dependency};
pub use closure::{resolve_full, resolve_full_map};
pub use export::{flatten, DependencyRow, WorkflowLookup, UNKNOWN_WORKFLOW};
pub use graph::DependencyGraph;
