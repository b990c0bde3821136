use crate::{DisplayLimits, ExpandState, FlattenedRow, Pagination, RowKind};
use infraview_core::{InfraNode, MAX_DEPTH, NodeId, NodeType};
use infraview_search::{SearchQuery, is_included};

/// Converts the model forest into display rows.
///
/// Output is a pure function of (nodes, expand state, display limits, term):
/// pre-order, children in model order, with paginated pools cut at their
/// display limit and followed by "Load More"/"Load All" sentinels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeFlattener {
    pagination: Pagination,
}

struct Pass<'s> {
    expanded: &'s ExpandState,
    limits: &'s DisplayLimits,
    query: Option<&'s SearchQuery>,
}

impl TreeFlattener {
    pub fn new(pagination: Pagination) -> Self {
        Self { pagination }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn flatten(
        &self,
        nodes: &[InfraNode],
        expanded: &ExpandState,
        limits: &DisplayLimits,
        search_term: &str,
    ) -> Vec<FlattenedRow> {
        let query = SearchQuery::parse(search_term);
        let pass = Pass {
            expanded,
            limits,
            query: query.as_ref(),
        };
        let mut rows = Vec::new();
        for node in nodes.iter().filter(|n| is_included(n, pass.query)) {
            self.emit_node(node, 0, &pass, &mut rows);
        }
        tracing::debug!("flattened {} rows (term: {:?})", rows.len(), search_term);
        rows
    }

    fn emit_node(
        &self,
        node: &InfraNode,
        level: usize,
        pass: &Pass<'_>,
        rows: &mut Vec<FlattenedRow>,
    ) {
        let is_expanded = pass.expanded.is_expanded(node.id.as_str());
        rows.push(FlattenedRow {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type,
            status: node.status,
            level,
            has_children: node.has_children(),
            is_expanded,
            kind: RowKind::Node,
        });

        if !is_expanded || !node.has_children() {
            return;
        }
        if level + 1 >= MAX_DEPTH {
            tracing::warn!("Not descending below {}: deeper than {} levels", node.id, MAX_DEPTH);
            return;
        }

        match pass.query {
            None => {
                let total = node.children.len();
                self.emit_children(node, node.children.iter(), total, level + 1, pass, rows)
            }
            Some(query) => {
                let included: Vec<&InfraNode> = node
                    .children
                    .iter()
                    .filter(|child| is_included(child, Some(query)))
                    .collect();
                let total = included.len();
                self.emit_children(node, included.into_iter(), total, level + 1, pass, rows);
            }
        }
    }

    fn emit_children<'a>(
        &self,
        parent: &InfraNode,
        children: impl Iterator<Item = &'a InfraNode>,
        total: usize,
        level: usize,
        pass: &Pass<'_>,
        rows: &mut Vec<FlattenedRow>,
    ) {
        let paginated =
            parent.node_type == NodeType::ServerPool && self.pagination.paginates(total);
        let shown = if paginated {
            pass.limits.get(parent.id.as_str(), &self.pagination).shown(total)
        } else {
            total
        };

        for child in children.take(shown) {
            self.emit_node(child, level, pass, rows);
        }

        if paginated && shown < total {
            rows.push(load_more_row(&parent.id, total, total - shown, level));
            rows.push(load_all_row(&parent.id, total, level));
        }
    }
}

fn load_more_row(
    pool_id: &NodeId,
    total_count: usize,
    remaining: usize,
    level: usize,
) -> FlattenedRow {
    FlattenedRow {
        id: NodeId(format!("{pool_id}-load-more")),
        label: format!("Load More ({} remaining)", group_thousands(remaining)),
        node_type: NodeType::Workload,
        status: None,
        level,
        has_children: false,
        is_expanded: false,
        kind: RowKind::LoadMore {
            pool_id: pool_id.clone(),
            total_count,
            remaining,
        },
    }
}

fn load_all_row(pool_id: &NodeId, total_count: usize, level: usize) -> FlattenedRow {
    FlattenedRow {
        id: NodeId(format!("{pool_id}-load-all")),
        label: format!("Load All ({} total)", group_thousands(total_count)),
        node_type: NodeType::Workload,
        status: None,
        level,
        has_children: false,
        is_expanded: false,
        kind: RowKind::LoadAll {
            pool_id: pool_id.clone(),
            total_count,
        },
    }
}

/// `9990` -> `9,990`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Flatten with the default pagination policy.
pub fn flatten(
    nodes: &[InfraNode],
    expanded: &ExpandState,
    limits: &DisplayLimits,
    search_term: &str,
) -> Vec<FlattenedRow> {
    TreeFlattener::default().flatten(nodes, expanded, limits, search_term)
}
