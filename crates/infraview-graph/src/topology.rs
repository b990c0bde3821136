use crate::{IdCorrespondence, Vec2};
use anyhow::Context;
use infraview_core::{NodeId, Status, StatusCounts};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a node in a topology projection. Distinct from [`NodeId`]
/// because a status group has no model counterpart of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopologyId(pub String);

impl TopologyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn root(env_id: &NodeId) -> Self {
        Self(format!("{env_id}-root"))
    }

    pub(crate) fn pool(pool_id: &NodeId) -> Self {
        Self(pool_id.0.clone())
    }

    pub(crate) fn group(pool_id: &NodeId, status: Status) -> Self {
        Self(format!("{pool_id}-{status}-group"))
    }
}

impl fmt::Display for TopologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TopologyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopologyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopologyKind {
    Root,
    ServerPool,
    Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    pub id: TopologyId,
    pub kind: TopologyKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Set only on status groups holding more than one workload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub position: Vec2,
    /// Model node this topology node stands for; a group's first workload.
    pub model_id: NodeId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workloads: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_counts: Option<StatusCounts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub id: String,
    pub source: TopologyId,
    pub target: TopologyId,
}

impl TopologyEdge {
    pub(crate) fn new(id: String, source: TopologyId, target: TopologyId) -> Self {
        Self { id, source, target }
    }
}

/// The projection of one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub env_id: NodeId,
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,
    pub id_map: IdCorrespondence,
}

impl Topology {
    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    /// The topology node to mark as selected for a model id, if any.
    pub fn highlighted(&self, selected: Option<&str>) -> Option<&TopologyId> {
        self.id_map.to_topology(selected?)
    }

    pub fn contains_model(&self, model_id: &str) -> bool {
        self.id_map.contains_model(model_id)
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .with_context(|| format!("Failed to serialize topology for {}", self.env_id))
    }
}
