//! Benchmarks for dependency extraction and closure resolution
//!
//! Extraction scans every transformation for every candidate name, so it
//! dominates run time on large exports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sqlscribe_core::{Catalog, TransformationRecord};
use sqlscribe_deps::{build_universe, extract_direct_map, resolve_full_map};

/// Generate N datasets, each reading from the previous two
fn generate_catalog(num_datasets: usize) -> Catalog {
    let records = (0..num_datasets).map(|i| {
        let sources: Vec<String> = (i.saturating_sub(2)..i)
            .map(|j| format!("dataset_{:05}", j))
            .collect();
        let from = if sources.is_empty() {
            "raw_source".to_string()
        } else {
            sources.join(" JOIN ")
        };

        TransformationRecord::new(
            format!("workflow_{}", i % 10),
            format!("dataset_{:05}", i),
            "1",
            "2024-01-01",
            format!("SELECT id, amount FROM {} WHERE amount > 0", from),
        )
    });

    Catalog::from_records(records)
}

fn bench_extract_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_direct");

    for num_datasets in [100, 500, 1000].iter() {
        let catalog = generate_catalog(*num_datasets);
        let universe = build_universe(&catalog.dataset_names, ["raw_source"]);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_datasets),
            num_datasets,
            |b, _| b.iter(|| black_box(extract_direct_map(&catalog, &universe))),
        );
    }

    group.finish();
}

fn bench_resolve_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_full");

    for num_datasets in [100, 500, 1000].iter() {
        let catalog = generate_catalog(*num_datasets);
        let universe = build_universe(&catalog.dataset_names, ["raw_source"]);
        let direct = extract_direct_map(&catalog, &universe);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_datasets),
            num_datasets,
            |b, _| b.iter(|| black_box(resolve_full_map(&direct))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extract_direct, bench_resolve_full);

criterion_main!(benches);
