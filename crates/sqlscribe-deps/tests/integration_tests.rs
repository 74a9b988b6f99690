//! Integration tests for dependency resolution over a grouped catalog

use pretty_assertions::assert_eq;
use sqlscribe_core::{Catalog, TransformationRecord};
use sqlscribe_deps::{
    build_universe, extract_direct_map, flatten, resolve_full, resolve_full_map, DependencyGraph,
    DependencyMap, UNKNOWN_WORKFLOW,
};
use std::collections::BTreeSet;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample_catalog() -> Catalog {
    Catalog::from_records(vec![
        TransformationRecord::new("Ingest", "stg_orders", "4", "2024-01-02", "SELECT * FROM ext_orders"),
        TransformationRecord::new("Ingest", "stg_customers", "2", "2024-01-02", "SELECT * FROM ext_customers WHERE category IS NOT NULL"),
        TransformationRecord::new("Marts", "fct_sales", "7", "2024-01-03", "SELECT o.id FROM stg_orders o"),
        TransformationRecord::new("Marts", "fct_sales", "7", "2024-01-03", "SELECT c.id FROM stg_customers c"),
        TransformationRecord::new("Marts", "rpt_revenue", "1", "2024-01-04", "SELECT SUM(x) FROM fct_sales"),
        TransformationRecord::new("Uploads", "ref_regions", "1", "2024-01-01", "uploaded file"),
    ])
}

fn resolve(catalog: &Catalog) -> (DependencyMap, DependencyMap) {
    let universe = build_universe(&catalog.dataset_names, ["ext_orders", "ext_customers", "CATEGORY"]);
    let direct = extract_direct_map(catalog, &universe);
    let full = resolve_full_map(&direct);
    (direct, full)
}

#[test]
fn direct_and_full_maps_for_a_small_warehouse() {
    let catalog = sample_catalog();
    let (direct, full) = resolve(&catalog);

    assert_eq!(direct["STG_ORDERS"], set(&["EXT_ORDERS"]));
    assert_eq!(direct["STG_CUSTOMERS"], set(&["EXT_CUSTOMERS"]));
    assert_eq!(direct["FCT_SALES"], set(&["STG_ORDERS", "STG_CUSTOMERS"]));
    assert_eq!(direct["RPT_REVENUE"], set(&["FCT_SALES"]));
    assert!(!direct.contains_key("REF_REGIONS"));

    assert_eq!(
        full["RPT_REVENUE"],
        set(&["FCT_SALES", "STG_ORDERS", "STG_CUSTOMERS", "EXT_ORDERS", "EXT_CUSTOMERS"])
    );
    assert_eq!(full["STG_ORDERS"], set(&["EXT_ORDERS"]));
}

#[test]
fn invariants_hold_for_every_dataset() {
    let catalog = sample_catalog();
    let universe = build_universe(&catalog.dataset_names, ["ext_orders", "ext_customers", "CATEGORY"]);
    let direct = extract_direct_map(&catalog, &universe);
    let full = resolve_full_map(&direct);

    for (dataset, deps) in &direct {
        for dep in deps {
            assert!(universe.contains(dep));
            assert_ne!(dep.trim(), "CATEGORY");
            assert!(!dep.trim().is_empty());
        }

        let closure = &full[dataset];
        assert!(!closure.contains(dataset));
        assert!(deps.iter().filter(|d| *d != dataset).all(|d| closure.contains(d)));
        assert_eq!(closure, &resolve_full(dataset, &direct));
    }
}

#[test]
fn export_rows_resolve_workflows() {
    let catalog = sample_catalog();
    let (direct, _) = resolve(&catalog);

    let rows = flatten(&direct, &catalog);

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.workflow != UNKNOWN_WORKFLOW));
    let sales: Vec<_> = rows.iter().filter(|r| r.dataset == "FCT_SALES").collect();
    assert_eq!(sales.len(), 2);
    assert!(sales.iter().all(|r| r.workflow == "Marts"));
}

#[test]
fn impact_of_a_raw_table() {
    let catalog = sample_catalog();
    let (direct, _) = resolve(&catalog);

    let graph = DependencyGraph::from_map(&direct);

    assert_eq!(graph.downstream("EXT_ORDERS"), vec!["STG_ORDERS", "FCT_SALES", "RPT_REVENUE"]);
    assert!(graph.topological_sort().is_some());
}
