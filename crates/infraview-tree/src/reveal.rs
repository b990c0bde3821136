use crate::{DisplayLimits, ExpandState, Pagination};
use infraview_core::{InfraNode, NodeType};

/// Make the last node of `path` appear in the flattened output.
///
/// `path` runs from a top-level node down to the target (see
/// `Infrastructure::ancestry`). Every ancestor is expanded, and paginated
/// pools on the way grow their display limit in whole "Load More" steps until
/// the next node on the path is shown. Returns true if any state changed.
pub fn reveal(
    path: &[&InfraNode],
    expanded: &mut ExpandState,
    limits: &mut DisplayLimits,
    pagination: &Pagination,
) -> bool {
    let mut changed = false;
    for pair in path.windows(2) {
        let (parent, child) = (pair[0], pair[1]);
        if !expanded.is_expanded(parent.id.as_str()) {
            expanded.set(&parent.id, true);
            changed = true;
        }
        if parent.node_type == NodeType::ServerPool && pagination.paginates(parent.children.len()) {
            let Some(index) = parent.children.iter().position(|c| c.id == child.id) else {
                tracing::warn!("{} is not a child of {}", child.id, parent.id);
                continue;
            };
            changed |= limits.ensure_visible(&parent.id, index, pagination);
        }
    }
    changed
}
