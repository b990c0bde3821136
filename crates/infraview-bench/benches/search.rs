use criterion::{Criterion, black_box, criterion_group, criterion_main};
use infraview_bench::large_sample;
use infraview_search::filter_tree_for_search;
use infraview_tree::{DisplayLimits, ExpandState, TreeFlattener};

fn bench_filter(c: &mut Criterion) {
    let infra = large_sample();

    c.bench_function("filter_100k_sparse_match", |b| {
        b.iter(|| black_box(filter_tree_for_search(&infra.nodes, black_box("redis")).len()))
    });

    c.bench_function("filter_100k_dense_match", |b| {
        b.iter(|| black_box(filter_tree_for_search(&infra.nodes, black_box("workload-9")).len()))
    });
}

fn bench_flatten_with_search(c: &mut Criterion) {
    let infra = large_sample();
    let flattener = TreeFlattener::default();
    let expanded = ExpandState::default();
    let limits = DisplayLimits::new();

    c.bench_function("flatten_100k_with_search", |b| {
        b.iter(|| {
            let rows =
                flattener.flatten(&infra.nodes, &expanded, &limits, black_box("workload-42"));
            black_box(rows);
        })
    });
}

criterion_group!(benches, bench_filter, bench_flatten_with_search);
criterion_main!(benches);
