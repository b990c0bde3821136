//! Ad-hoc nodes and edges drawn on top of a topology projection.
//!
//! Sketches live beside the projection, never inside it: they have no model
//! counterpart, so they never enter the id correspondence, and they are thrown
//! away whenever a different environment is projected.

use infraview_core::{IdGenerator, NodeId, SequentialIdGenerator};
use infraview_graph::{Topology, Vec2};
use serde::Serialize;

/// First counter value for sketched node ids.
pub const SKETCH_ID_SEED: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SketchNode {
    pub id: String,
    pub label: String,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SketchEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

pub struct SketchOverlay {
    env_id: Option<NodeId>,
    ids: Box<dyn IdGenerator + Send>,
    nodes: Vec<SketchNode>,
    edges: Vec<SketchEdge>,
}

impl std::fmt::Debug for SketchOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchOverlay")
            .field("env_id", &self.env_id)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

impl Default for SketchOverlay {
    fn default() -> Self {
        Self::for_environment(None)
    }
}

impl SketchOverlay {
    /// Overlay whose ids read `<env>-<n>`, counting from [`SKETCH_ID_SEED`].
    pub fn for_environment(env_id: Option<NodeId>) -> Self {
        let prefix = env_id.as_ref().map_or("sketch", NodeId::as_str);
        let ids = SequentialIdGenerator::new(prefix, SKETCH_ID_SEED);
        Self::with_generator(env_id, Box::new(ids))
    }

    pub fn with_generator(env_id: Option<NodeId>, ids: Box<dyn IdGenerator + Send>) -> Self {
        Self {
            env_id,
            ids,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn env_id(&self) -> Option<&NodeId> {
        self.env_id.as_ref()
    }

    pub fn nodes(&self) -> &[SketchNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SketchEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    fn has_endpoint(&self, topology: &Topology, id: &str) -> bool {
        topology.node(id).is_some() || self.nodes.iter().any(|node| node.id == id)
    }

    /// Connect two existing nodes. Returns `None` when an endpoint is unknown
    /// or the connection already exists.
    pub fn connect(
        &mut self,
        topology: &Topology,
        source: &str,
        target: &str,
    ) -> Option<&SketchEdge> {
        if !self.has_endpoint(topology, source) || !self.has_endpoint(topology, target) {
            tracing::warn!("Ignoring sketch edge {} -> {}: unknown endpoint", source, target);
            return None;
        }
        let id = format!("{source}-{target}");
        if self.edges.iter().any(|edge| edge.id == id) {
            return None;
        }
        self.edges.push(SketchEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
        });
        self.edges.last()
    }

    /// A connection released on empty canvas creates a node there, linked back
    /// to where the drag started when that node is known.
    pub fn drop_at(&mut self, topology: &Topology, source: &str, position: Vec2) -> &SketchNode {
        let id = self.ids.next();
        if self.has_endpoint(topology, source) {
            self.edges.push(SketchEdge {
                id: id.clone(),
                source: source.to_string(),
                target: id.clone(),
            });
        }
        tracing::debug!("Sketched node {} at ({}, {})", id, position.x, position.y);
        self.nodes.push(SketchNode {
            label: format!("Node {id}"),
            id,
            position,
        });
        &self.nodes[self.nodes.len() - 1]
    }
}
