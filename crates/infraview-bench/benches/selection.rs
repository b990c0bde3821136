use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use infraview_app::{InfraProject, ViewController, ViewSettings};
use infraview_bench::{large_sample, write_sample_project};
use infraview_core::NodeId;
use infraview_events::{ActivationOrigin, Event, EventBus};

fn bench_cross_environment_selection(c: &mut Criterion) {
    let infra = large_sample();

    c.bench_function("select_across_environments", |b| {
        b.iter_batched(
            || ViewController::new(infra.clone(), ViewSettings::default()).unwrap(),
            |mut view| {
                view.select(NodeId::from("eu-west-pool-2-w2"));
                view.select(NodeId::from("us-east-pool-1-w99999"));
                black_box(view.highlighted_topology_id());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_event_dispatch(c: &mut Criterion) {
    let infra = large_sample();
    let mut view = ViewController::new(infra, ViewSettings::default()).unwrap();
    let bus = EventBus::new();

    c.bench_function("dispatch_toggle_and_activate", |b| {
        b.iter(|| {
            bus.publish(Event::ExpandToggle {
                id: NodeId::from("us-east-pool-1"),
            });
            bus.publish(Event::NodeActivate {
                id: "us-east-pool-1-warning-group".to_string(),
                origin: ActivationOrigin::Topology,
            });
            bus.dispatch_to(&mut view);
            black_box(view.rows().len());
        })
    });
}

fn bench_project_load(c: &mut Criterion) {
    let Ok((_dir, path)) = write_sample_project() else {
        return;
    };

    c.bench_function("load_project_100k", |b| {
        b.iter(|| black_box(InfraProject::load(&path).is_ok()))
    });
}

criterion_group!(
    benches,
    bench_cross_environment_selection,
    bench_event_dispatch,
    bench_project_load
);
criterion_main!(benches);
