//! Candidate name universe
//!
//! Every name that may be reported as a dependency: the datasets found in the
//! input plus an auxiliary list of known table names, all uppercased.

use std::collections::BTreeSet;

/// Set of uppercased candidate names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameUniverse {
    names: BTreeSet<String>,
}

impl NameUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, uppercasing it. No filtering happens here.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameUniverse {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut universe = NameUniverse::new();
        for name in iter {
            universe.insert(name.as_ref());
        }
        universe
    }
}

/// Build the universe from dataset names and auxiliary table names
pub fn build_universe<D, A>(dataset_names: D, auxiliary_names: A) -> NameUniverse
where
    D: IntoIterator,
    D::Item: AsRef<str>,
    A: IntoIterator,
    A::Item: AsRef<str>,
{
    let mut universe: NameUniverse = dataset_names.into_iter().collect();
    for name in auxiliary_names {
        universe.insert(name.as_ref());
    }
    universe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_uppercased() {
        let universe = build_universe(["orders", "Customers"], ["raw_orders", "ORDERS"]);

        assert_eq!(universe.len(), 3);
        assert!(universe.contains("ORDERS"));
        assert!(universe.contains("CUSTOMERS"));
        assert!(universe.contains("RAW_ORDERS"));
        assert!(!universe.contains("orders"));
    }

    #[test]
    fn no_filtering_at_build_time() {
        let universe = build_universe(["", "CATEGORY"], ["\t"]);
        assert_eq!(universe.len(), 3);
        assert!(universe.contains("CATEGORY"));
    }

    #[test]
    fn empty_inputs_give_empty_universe() {
        let universe = build_universe(Vec::<String>::new(), Vec::<String>::new());
        assert!(universe.is_empty());
    }
}
