//! Shared traversal over the infrastructure forest.
//!
//! Every view resolves ids through these helpers instead of keeping its own
//! recursive lookup. Traversals are iterative or depth-capped so a malformed
//! document fails fast instead of exhausting the stack.

use crate::{InfraNode, ModelError, NodeType};
use std::collections::HashSet;

/// Deepest nesting accepted by validation and ancestry lookups.
pub const MAX_DEPTH: usize = 64;

/// Pre-order iterator over a forest, yielding `(depth, node)`.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a InfraNode)>,
}

impl<'a> Walk<'a> {
    pub fn new(roots: &'a [InfraNode]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a InfraNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

pub fn find_node<'a>(roots: &'a [InfraNode], id: &str) -> Option<&'a InfraNode> {
    Walk::new(roots)
        .map(|(_, node)| node)
        .find(|node| node.id.as_str() == id)
}

fn contains(node: &InfraNode, id: &str) -> bool {
    Walk::new(std::slice::from_ref(node)).any(|(_, n)| n.id.as_str() == id)
}

/// Top-level node owning `id`, or the node itself when `id` names a root.
///
/// Environments are scanned in order and the scan stops at the first one whose
/// subtree contains the id.
pub fn owning_environment<'a>(roots: &'a [InfraNode], id: &str) -> Option<&'a InfraNode> {
    if let Some(root) = roots.iter().find(|root| root.id.as_str() == id) {
        return Some(root);
    }
    roots.iter().find(|root| contains(root, id))
}

/// Path from the owning root down to the node with `id`, both inclusive.
pub fn ancestry<'a>(roots: &'a [InfraNode], id: &str) -> Option<Vec<&'a InfraNode>> {
    fn descend<'a>(node: &'a InfraNode, id: &str, path: &mut Vec<&'a InfraNode>) -> bool {
        if path.len() >= MAX_DEPTH {
            return false;
        }
        path.push(node);
        if node.id.as_str() == id {
            return true;
        }
        for child in &node.children {
            if descend(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    for root in roots {
        if descend(root, id, &mut path) {
            return Some(path);
        }
    }
    None
}

/// Checks the structural invariants the views rely on: forest-wide id
/// uniqueness, bounded depth, environments at the top, and childless workloads.
pub fn validate(roots: &[InfraNode]) -> Result<(), ModelError> {
    if let Some(root) = roots
        .iter()
        .find(|root| root.node_type != NodeType::Environment)
    {
        return Err(ModelError::RootNotEnvironment {
            id: root.id.to_string(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (depth, node) in Walk::new(roots) {
        if depth >= MAX_DEPTH {
            return Err(ModelError::DepthExceeded {
                id: node.id.to_string(),
                max: MAX_DEPTH,
            });
        }
        if !seen.insert(node.id.as_str()) {
            return Err(ModelError::DuplicateId {
                id: node.id.to_string(),
            });
        }
        if node.node_type == NodeType::Workload && node.has_children() {
            return Err(ModelError::LeafWithChildren {
                id: node.id.to_string(),
            });
        }
    }
    Ok(())
}
