use criterion::{Criterion, black_box, criterion_group, criterion_main};
use infraview_bench::large_sample;
use infraview_graph::project;

fn bench_project_large_environment(c: &mut Criterion) {
    let infra = large_sample();
    let Some(env) = infra.environment("us-east") else {
        return;
    };

    c.bench_function("project_100k_workloads", |b| {
        b.iter(|| {
            let topology = project(black_box(env));
            black_box(topology);
        })
    });
}

criterion_group!(benches, bench_project_large_environment);
criterion_main!(benches);
