use crate::TopologyId;
use infraview_core::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bidirectional id mapping between the model and one topology projection.
///
/// `to_topology` covers every id of the projected environment. `to_model` is
/// the partial inverse: a status group maps back to its first workload.
/// Ordered maps keep serialized output stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCorrespondence {
    to_topology: BTreeMap<NodeId, TopologyId>,
    to_model: BTreeMap<TopologyId, NodeId>,
}

impl IdCorrespondence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map one model id onto a topology node. The first model id recorded
    /// for a topology node becomes its representative.
    pub fn link(&mut self, model_id: NodeId, topology_id: TopologyId) {
        self.to_model
            .entry(topology_id.clone())
            .or_insert_with(|| model_id.clone());
        self.to_topology.insert(model_id, topology_id);
    }

    pub fn to_topology(&self, model_id: &str) -> Option<&TopologyId> {
        self.to_topology.get(model_id)
    }

    pub fn to_model(&self, topology_id: &str) -> Option<&NodeId> {
        self.to_model.get(topology_id)
    }

    pub fn contains_model(&self, model_id: &str) -> bool {
        self.to_topology.contains_key(model_id)
    }

    /// Number of model ids covered.
    pub fn len(&self) -> usize {
        self.to_topology.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_topology.is_empty()
    }
}
