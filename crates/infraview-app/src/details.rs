use infraview_core::{Infrastructure, NodeId, NodeType, Status, StatusCounts};
use serde::Serialize;
use std::collections::BTreeMap;

/// What the details panel shows for the selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub environment_id: NodeId,
    pub child_count: usize,
    /// Workload breakdown, for pools only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_counts: Option<StatusCounts>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl NodeDetails {
    pub fn lookup(infrastructure: &Infrastructure, id: &str) -> Option<Self> {
        let path = infrastructure.ancestry(id)?;
        let (environment, node) = (path.first()?, path.last()?);
        let status_counts = (node.node_type == NodeType::ServerPool)
            .then(|| StatusCounts::of_workloads(&node.children));
        Some(Self {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type,
            status: node.status,
            environment_id: environment.id.clone(),
            child_count: node.children.len(),
            status_counts,
            metadata: node.metadata.clone(),
        })
    }
}
