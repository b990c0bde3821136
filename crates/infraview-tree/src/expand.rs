use infraview_core::NodeId;
use std::collections::HashMap;

/// Per-node expand/collapse overrides on top of a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandState {
    overrides: HashMap<NodeId, bool>,
    default_expanded: bool,
}

impl Default for ExpandState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExpandState {
    pub fn new(default_expanded: bool) -> Self {
        Self {
            overrides: HashMap::new(),
            default_expanded,
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.overrides
            .get(id)
            .copied()
            .unwrap_or(self.default_expanded)
    }

    pub fn set(&mut self, id: &NodeId, expanded: bool) {
        if expanded == self.default_expanded {
            self.overrides.remove(id.as_str());
        } else {
            self.overrides.insert(id.clone(), expanded);
        }
    }

    /// Flip a node and return its new state.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let expanded = !self.is_expanded(id.as_str());
        self.set(id, expanded);
        expanded
    }

    pub fn expand_all(&mut self) {
        self.overrides.clear();
        self.default_expanded = true;
    }

    pub fn collapse_all(&mut self) {
        self.overrides.clear();
        self.default_expanded = false;
    }

    pub fn default_expanded(&self) -> bool {
        self.default_expanded
    }
}
