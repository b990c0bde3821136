use crate::{
    IdCorrespondence, TierLayout, Topology, TopologyEdge, TopologyId, TopologyKind, TopologyNode,
};
use infraview_core::{InfraNode, NodeId, NodeType, Status, StatusCounts};

/// Turns one environment subtree into a three-tier node/edge graph.
///
/// Workloads are folded into at most three status groups per pool, so the
/// output size is bounded by the pool count whatever the leaf count.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyProjector {
    layout: TierLayout,
}

impl TopologyProjector {
    pub fn new(layout: TierLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TierLayout {
        &self.layout
    }

    pub fn project(&self, environment: &InfraNode) -> Topology {
        let pools: Vec<&InfraNode> = environment
            .children
            .iter()
            .filter(|child| {
                let keep = child.node_type == NodeType::ServerPool;
                if !keep {
                    tracing::debug!(
                        "Skipping {} child {} of environment {}",
                        child.node_type,
                        child.id,
                        environment.id
                    );
                }
                keep
            })
            .collect();

        let mut nodes = Vec::with_capacity(1 + pools.len() * 4);
        let mut edges = Vec::with_capacity(pools.len() * 4);
        let mut id_map = IdCorrespondence::new();

        let root_id = TopologyId::root(&environment.id);
        nodes.push(TopologyNode {
            id: root_id.clone(),
            kind: TopologyKind::Root,
            label: environment.label.clone(),
            status: None,
            count: None,
            position: self.layout.root(pools.len()),
            model_id: environment.id.clone(),
            workloads: Vec::new(),
            status_counts: None,
        });
        id_map.link(environment.id.clone(), root_id.clone());

        for (pool_index, pool) in pools.iter().enumerate() {
            let pool_topology_id = TopologyId::pool(&pool.id);
            let pool_position = self.layout.pool(pool_index);
            let buckets = bucket_workloads(pool);

            nodes.push(TopologyNode {
                id: pool_topology_id.clone(),
                kind: TopologyKind::ServerPool,
                label: pool.label.clone(),
                status: None,
                count: None,
                position: pool_position,
                model_id: pool.id.clone(),
                workloads: Vec::new(),
                status_counts: Some(StatusCounts::of_workloads(&pool.children)),
            });
            id_map.link(pool.id.clone(), pool_topology_id.clone());
            edges.push(TopologyEdge::new(
                format!("{}-{}", root_id, pool.id),
                root_id.clone(),
                pool_topology_id.clone(),
            ));

            let group_count = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
            let non_empty = Status::ALL
                .into_iter()
                .zip(buckets)
                .filter(|(_, bucket)| !bucket.is_empty());

            for (group_index, (status, workloads)) in non_empty.enumerate() {
                let group_id = TopologyId::group(&pool.id, status);
                let (label, count) = match workloads.as_slice() {
                    [single] => (single.label.clone(), None),
                    many => (format!("{}x {}", many.len(), status), Some(many.len())),
                };

                let workload_ids: Vec<NodeId> =
                    workloads.iter().map(|workload| workload.id.clone()).collect();
                for workload_id in &workload_ids {
                    id_map.link(workload_id.clone(), group_id.clone());
                }

                edges.push(TopologyEdge::new(
                    format!("{}-{}", pool.id, group_id),
                    pool_topology_id.clone(),
                    group_id.clone(),
                ));
                nodes.push(TopologyNode {
                    id: group_id,
                    kind: TopologyKind::Server,
                    label,
                    status: Some(status),
                    count,
                    position: self.layout.group(pool_position, group_index, group_count),
                    model_id: workload_ids[0].clone(),
                    workloads: workload_ids,
                    status_counts: None,
                });
            }
        }

        tracing::debug!(
            "Projected {}: {} nodes, {} edges, {} ids mapped",
            environment.id,
            nodes.len(),
            edges.len(),
            id_map.len()
        );

        Topology {
            env_id: environment.id.clone(),
            nodes,
            edges,
            id_map,
        }
    }
}

/// Project with the default tier layout.
pub fn project(environment: &InfraNode) -> Topology {
    TopologyProjector::default().project(environment)
}

/// Workloads of a pool split by effective status, in `Status::ALL` order.
fn bucket_workloads(pool: &InfraNode) -> [Vec<&InfraNode>; 3] {
    let mut buckets: [Vec<&InfraNode>; 3] = Default::default();
    for child in &pool.children {
        if child.node_type != NodeType::Workload {
            tracing::debug!("Skipping {} child {} of pool {}", child.node_type, child.id, pool.id);
            continue;
        }
        buckets[child.effective_status().index()].push(child);
    }
    buckets
}
