use criterion::{Criterion, black_box, criterion_group, criterion_main};
use infraview_bench::large_sample;
use infraview_core::NodeId;
use infraview_tree::{DisplayLimits, ExpandState, Pagination, TreeFlattener};

fn bench_flatten_default_limits(c: &mut Criterion) {
    let infra = large_sample();
    let flattener = TreeFlattener::default();
    let expanded = ExpandState::default();
    let limits = DisplayLimits::new();

    c.bench_function("flatten_100k_default_limits", |b| {
        b.iter(|| {
            let rows = flattener.flatten(black_box(&infra.nodes), &expanded, &limits, "");
            black_box(rows);
        })
    });
}

fn bench_flatten_load_all(c: &mut Criterion) {
    let infra = large_sample();
    let flattener = TreeFlattener::default();
    let expanded = ExpandState::default();
    let mut limits = DisplayLimits::new();
    limits.load_all(&NodeId::from("us-east-pool-1"));

    c.bench_function("flatten_100k_load_all", |b| {
        b.iter(|| {
            let rows = flattener.flatten(black_box(&infra.nodes), &expanded, &limits, "");
            black_box(rows);
        })
    });
}

fn bench_load_more_steps(c: &mut Criterion) {
    let infra = large_sample();
    let flattener = TreeFlattener::default();
    let expanded = ExpandState::default();
    let pagination = Pagination::default();
    let pool = NodeId::from("us-east-pool-1");

    c.bench_function("flatten_after_50_load_more", |b| {
        b.iter(|| {
            let mut limits = DisplayLimits::new();
            for _ in 0..50 {
                limits.load_more(&pool, &pagination);
            }
            black_box(flattener.flatten(&infra.nodes, &expanded, &limits, ""));
        })
    });
}

criterion_group!(
    benches,
    bench_flatten_default_limits,
    bench_flatten_load_all,
    bench_load_more_steps
);
criterion_main!(benches);
