use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

pub mod error;
pub mod ids;
pub mod sample;
pub mod traverse;

pub use error::ModelError;
pub use ids::{IdGenerator, SequentialIdGenerator};
pub use traverse::{MAX_DEPTH, Walk};

/// Identifier of a node in the infrastructure model.
///
/// Ids are unique across the whole forest, not just among siblings, so every
/// derived map (expand state, display limits, id correspondence) keys by them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Environment,
    ServerPool,
    Workload,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Environment => "environment",
            NodeType::ServerPool => "serverPool",
            NodeType::Workload => "workload",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health of a workload. The declaration order is the bucket order used by the
/// topology projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Healthy,
    Warning,
    Error,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Healthy, Status::Warning, Status::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Healthy => "healthy",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Status::Healthy => 0,
            Status::Warning => 1,
            Status::Error => 2,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfraNode {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InfraNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl InfraNode {
    fn new(id: impl Into<NodeId>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            status: None,
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn environment(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        pools: Vec<InfraNode>,
    ) -> Self {
        Self {
            children: pools,
            ..Self::new(id, label, NodeType::Environment)
        }
    }

    pub fn server_pool(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        workloads: Vec<InfraNode>,
    ) -> Self {
        Self {
            children: workloads,
            ..Self::new(id, label, NodeType::ServerPool)
        }
    }

    pub fn workload(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        status: Option<Status>,
    ) -> Self {
        Self {
            status,
            ..Self::new(id, label, NodeType::Workload)
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Status used by every derived view: a missing status counts as healthy.
    pub fn effective_status(&self) -> Status {
        self.status.unwrap_or(Status::Healthy)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A named forest of environments. Immutable once built; views only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<InfraNode>,
}

impl Infrastructure {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nodes: Vec<InfraNode>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            nodes,
        }
    }

    /// Parse and validate an infrastructure document.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let infrastructure: Infrastructure = serde_json::from_str(json)?;
        infrastructure.validate()?;
        Ok(infrastructure)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        traverse::validate(&self.nodes)
    }

    pub fn environments(&self) -> &[InfraNode] {
        &self.nodes
    }

    pub fn environment(&self, id: &str) -> Option<&InfraNode> {
        self.nodes.iter().find(|env| env.id.as_str() == id)
    }

    pub fn first_environment(&self) -> Option<&InfraNode> {
        self.nodes.first()
    }

    pub fn find_node(&self, id: &str) -> Option<&InfraNode> {
        traverse::find_node(&self.nodes, id)
    }

    pub fn owning_environment(&self, id: &str) -> Option<&InfraNode> {
        traverse::owning_environment(&self.nodes, id)
    }

    pub fn ancestry(&self, id: &str) -> Option<Vec<&InfraNode>> {
        traverse::ancestry(&self.nodes, id)
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.nodes)
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

/// Per-status workload tally, as shown in pool details and status gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub healthy: usize,
    pub warning: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn of_workloads<'a>(nodes: impl IntoIterator<Item = &'a InfraNode>) -> Self {
        let mut counts = Self::default();
        for node in nodes {
            if node.node_type == NodeType::Workload {
                counts.add(node.effective_status());
            }
        }
        counts
    }

    pub fn add(&mut self, status: Status) {
        match status {
            Status::Healthy => self.healthy += 1,
            Status::Warning => self.warning += 1,
            Status::Error => self.error += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Healthy => self.healthy,
            Status::Warning => self.warning,
            Status::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.warning + self.error
    }

    /// The most severe status present, if any workload was counted.
    pub fn worst(&self) -> Option<Status> {
        Status::ALL
            .into_iter()
            .rev()
            .find(|status| self.get(*status) > 0)
    }
}
