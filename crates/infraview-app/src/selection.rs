use infraview_core::{Infrastructure, NodeId};
use infraview_graph::{Topology, TopologyId};

/// Holds the one selected model id shared by the tree and topology views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<NodeId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` without checking that it exists. An unknown id simply
    /// highlights nothing.
    pub fn select(&mut self, id: impl Into<NodeId>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// Id of the top-level environment containing `id`, or `id` itself when it
    /// names one.
    pub fn resolve_owning_environment<'a>(
        &self,
        infrastructure: &'a Infrastructure,
        id: &str,
    ) -> Option<&'a NodeId> {
        infrastructure.owning_environment(id).map(|env| &env.id)
    }

    pub fn highlighted_topology_id<'a>(&self, topology: &'a Topology) -> Option<&'a TopologyId> {
        topology.highlighted(self.selected.as_ref().map(NodeId::as_str))
    }
}
