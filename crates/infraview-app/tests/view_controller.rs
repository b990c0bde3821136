use infraview_app::{Renderer, TopologyFrame, TreeFrame, ViewController, ViewSettings};
use infraview_core::{InfraNode, Infrastructure, ModelError, NodeId};
use infraview_core::sample::cloud_multi_region;
use infraview_events::{ActivationOrigin, Notification};
use infraview_graph::Vec2;
use infraview_tree::DisplayLimit;
use std::time::{Duration, Instant};

fn view(large_pool: usize) -> ViewController {
    ViewController::new(cloud_multi_region(large_pool), ViewSettings::default()).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn topology_node_ids(view: &mut ViewController) -> Vec<String> {
    view.topology()
        .map(|t| t.nodes.iter().map(|n| n.id.to_string()).collect())
        .unwrap_or_default()
}

#[derive(Default)]
struct RecordingRenderer {
    tree_rows: Vec<String>,
    selected_row: Option<usize>,
    sticky: Vec<usize>,
    highlighted: Option<String>,
    topology_nodes: usize,
    sketch_nodes: usize,
    resets: Vec<Option<String>>,
}

impl Renderer for RecordingRenderer {
    fn render_tree(&mut self, frame: &TreeFrame<'_>) {
        self.tree_rows = frame.rows.iter().map(|r| r.label.clone()).collect();
        self.selected_row = frame.selected_row;
        self.sticky = frame.sticky.clone();
    }

    fn render_topology(&mut self, frame: &TopologyFrame<'_>) {
        self.highlighted = frame.highlighted.map(|id| id.to_string());
        self.topology_nodes = frame.topology.nodes.len();
        self.sketch_nodes = frame.sketch.nodes().len();
    }

    fn reset_topology(&mut self, env_id: Option<&NodeId>) {
        self.resets.push(env_id.map(|id| id.to_string()));
    }
}

#[test]
fn selection_switches_environment_and_projection() {
    let mut view = view(20);
    let us_east_nodes = topology_node_ids(&mut view);
    assert!(us_east_nodes.contains(&"us-east-root".to_string()));

    view.on_node_activate("us-east-pool-2-w1", ActivationOrigin::Tree);
    assert_eq!(view.active_environment().map(NodeId::as_str), Some("us-east"));
    assert_eq!(topology_node_ids(&mut view), us_east_nodes);

    view.notifications().drain();
    view.on_node_activate("eu-west-pool-2-w2", ActivationOrigin::Tree);
    assert_eq!(view.active_environment().map(NodeId::as_str), Some("eu-west"));

    let eu_west_nodes = topology_node_ids(&mut view);
    assert_ne!(eu_west_nodes, us_east_nodes);
    assert!(eu_west_nodes.iter().all(|id| id.starts_with("eu-west")));
    assert_eq!(
        view.highlighted_topology_id().map(|id| id.to_string()),
        Some("eu-west-pool-2-warning-group".to_string())
    );

    let notifications = view.notifications().drain();
    assert!(notifications.contains(&Notification::ActiveEnvironmentChanged {
        previous: Some(NodeId::from("us-east")),
        current: Some(NodeId::from("eu-west")),
    }));
    assert!(notifications.contains(&Notification::TopologyReset {
        env_id: Some(NodeId::from("eu-west")),
    }));
}

#[test]
fn topology_activation_maps_to_representative_workload() {
    let mut view = view(1_000);
    let selected = view.on_node_activate("us-east-pool-1-error-group", ActivationOrigin::Topology);
    assert_eq!(selected.as_ref().map(NodeId::as_str), Some("us-east-pool-1-w10"));
    assert_eq!(
        view.highlighted_topology_id().map(|id| id.to_string()),
        Some("us-east-pool-1-error-group".to_string())
    );

    assert_eq!(view.selected_row_id().as_ref().map(NodeId::as_str), Some("us-east-pool-1-w10"));
    assert_eq!(view.focused_pool().map(NodeId::as_str), Some("us-east-pool-1"));

    assert!(view.on_node_activate("no-such-node", ActivationOrigin::Topology).is_none());
    assert_eq!(view.selected().map(NodeId::as_str), Some("us-east-pool-1-w10"));

    let warning = view.on_node_activate("us-east-pool-1-warning-group", ActivationOrigin::Topology);
    assert_eq!(warning.as_ref().map(NodeId::as_str), Some("us-east-pool-1-w8"));
    // Selecting past the first page grows the pool's display limit.
    view.select(NodeId::from("us-east-pool-1-w458"));
    assert_eq!(view.selected_row_id().as_ref().map(NodeId::as_str), Some("us-east-pool-1-w458"));
}

#[test]
fn reveal_deep_workload_scrolls_into_view() {
    let mut view = view(100_000);
    view.resize(400.0, 360.0);
    view.collapse_all();
    assert_eq!(view.rows().len(), 2);

    view.select(NodeId::from("us-east-pool-1-w4321"));
    let index = view.selected_row_index().unwrap();
    let total = view.rows().len();
    assert!(total < 5_000);

    let window = view.viewport().window(total);
    assert!(window.first_visible <= index && index < window.end);

    let mut renderer = RecordingRenderer::default();
    view.render(&mut renderer);
    assert!(renderer.tree_rows.contains(&"workload-4321".to_string()));
    assert_eq!(renderer.selected_row, Some(index));
    assert_eq!(renderer.sticky, vec![0, 1]);
}

#[test]
fn typing_burst_applies_one_filter() {
    let mut view = view(20);
    let t0 = Instant::now();
    let full = view.rows().len();
    view.notifications().drain();

    view.on_search_input("r", t0);
    view.on_search_input("re", t0 + ms(100));
    view.on_search_input("redis", t0 + ms(200));
    assert_eq!(view.search_text(), "redis");
    assert_eq!(view.applied_search(), "");
    assert_eq!(view.rows().len(), full);

    assert!(!view.tick(t0 + ms(400)));
    assert!(view.tick(t0 + ms(500)));
    assert!(!view.tick(t0 + ms(900)));

    let applied: Vec<_> = view
        .notifications()
        .drain()
        .into_iter()
        .filter(|n| matches!(n, Notification::SearchApplied { .. }))
        .collect();
    assert_eq!(
        applied,
        vec![Notification::SearchApplied {
            term: "redis".to_string()
        }]
    );

    let labels: Vec<String> = view.rows().iter().map(|r| r.label.clone()).collect();
    assert_eq!(
        labels,
        vec![
            "us-east-1.aws.com",
            "Database Pool",
            "aws-redis-cache",
            "eu-west-1.aws.com",
            "Database Pool",
            "aws-redis-cache",
        ]
    );

    // The active topology is projected from the filtered subtree.
    assert_eq!(
        topology_node_ids(&mut view),
        vec!["us-east-root", "us-east-pool-3", "us-east-pool-3-error-group"]
    );
}

#[test]
fn commit_applies_pending_search_immediately() {
    let mut view = view(20);
    view.on_search_input("kong", Instant::now());
    assert!(view.commit_search());
    assert_eq!(view.applied_search(), "kong");
    assert!(view.rows().iter().any(|r| r.label == "aws-kong-gateway-1"));
}

#[test]
fn sketches_are_discarded_on_environment_switch() {
    let mut view = view(20);
    let id = view
        .sketch_drop("us-east-pool-1", Vec2::new(50.0, 500.0))
        .unwrap();
    assert_eq!(id, "us-east-100");
    assert!(view.sketch_connect(&id, "us-east-pool-2"));
    assert!(view.on_node_activate(&id, ActivationOrigin::Topology).is_none());

    let mut renderer = RecordingRenderer::default();
    view.render(&mut renderer);
    assert_eq!(renderer.sketch_nodes, 1);
    assert_eq!(renderer.topology_nodes, 1 + 3 + 3 + 2 + 2);
    assert!(renderer.resets.is_empty());

    view.select(NodeId::from("eu-west"));
    view.render(&mut renderer);
    assert_eq!(renderer.sketch_nodes, 0);
    assert_eq!(renderer.resets, vec![Some("eu-west".to_string())]);
    assert_eq!(renderer.highlighted.as_deref(), Some("eu-west-root"));
    assert_eq!(view.sketch().env_id().map(NodeId::as_str), Some("eu-west"));
}

#[test]
fn load_more_until_pool_is_complete() {
    let mut view = view(95);
    let pool = NodeId::from("us-east-pool-1");
    let count_rows = |view: &mut ViewController| {
        view.rows()
            .iter()
            .filter(|r| r.id.as_str().starts_with("us-east-pool-1-w"))
            .count()
    };
    assert_eq!(count_rows(&mut view), 10);

    // ceil((95 - 10) / 20) = 5 steps.
    for expected in [30, 50, 70, 90] {
        view.on_load_more(&pool);
        assert_eq!(count_rows(&mut view), expected);
        assert!(view.rows().iter().any(|r| r.is_load_more()));
    }
    view.on_load_more(&pool);
    assert_eq!(count_rows(&mut view), 95);
    assert!(!view.rows().iter().any(|r| r.is_synthetic()));
}

#[test]
fn activating_sentinel_rows_pages_without_touching_selection() {
    let mut view = view(100);
    let pool = NodeId::from("us-east-pool-1");
    let limit = |view: &ViewController| view.display_limits().get(pool.as_str(), view.pagination());

    view.on_node_activate("us-east-pool-1-w3", ActivationOrigin::Tree);
    let highlighted = view.highlighted_topology_id();
    assert_eq!(limit(&view), DisplayLimit::Bounded(10));
    view.notifications().drain();

    assert!(view.on_node_activate("us-east-pool-1-load-more", ActivationOrigin::Tree).is_none());
    assert_eq!(limit(&view), DisplayLimit::Bounded(30));
    assert_eq!(view.selected().map(NodeId::as_str), Some("us-east-pool-1-w3"));
    assert_eq!(view.highlighted_topology_id(), highlighted);
    let notifications = view.notifications().drain();
    assert_eq!(notifications, vec![Notification::RowsInvalidated]);

    assert!(view.on_node_activate("us-east-pool-1-load-all", ActivationOrigin::Tree).is_none());
    assert_eq!(limit(&view), DisplayLimit::Unbounded);
    assert_eq!(view.selected().map(NodeId::as_str), Some("us-east-pool-1-w3"));
    assert!(!view.rows().iter().any(|r| r.is_synthetic()));
}

#[test]
fn malformed_models_are_rejected() {
    let shared_pool = |env: &str| {
        InfraNode::environment(env, env, vec![InfraNode::server_pool("p", "P", vec![])])
    };
    let infra = Infrastructure::new("dup", "", vec![shared_pool("e1"), shared_pool("e2")]);
    match ViewController::new(infra, ViewSettings::default()) {
        Err(ModelError::DuplicateId { id }) => assert_eq!(id, "p"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("duplicate pool id was accepted"),
    }
}
