use crate::SearchQuery;
use infraview_core::{InfraNode, MAX_DEPTH, Walk};
use std::borrow::Cow;

/// True when the node's label or any descendant's label matches.
pub fn subtree_matches(node: &InfraNode, query: &SearchQuery) -> bool {
    Walk::new(std::slice::from_ref(node)).any(|(_, n)| query.matches(&n.label))
}

/// Whether a node survives filtering. Without a query everything does.
pub fn is_included(node: &InfraNode, query: Option<&SearchQuery>) -> bool {
    query.is_none_or(|q| subtree_matches(node, q))
}

/// Prunes the forest down to matching nodes and their ancestors.
///
/// Children of a kept node are filtered with the same rule, so a matching pool
/// only keeps its matching workloads. A blank term borrows the input untouched.
pub fn filter_tree_for_search<'a>(nodes: &'a [InfraNode], term: &str) -> Cow<'a, [InfraNode]> {
    let Some(query) = SearchQuery::parse(term) else {
        return Cow::Borrowed(nodes);
    };
    let filtered: Vec<InfraNode> = nodes
        .iter()
        .filter_map(|node| prune(node, &query, 0))
        .collect();
    tracing::debug!(
        "search filter `{}` kept {} of {} top-level nodes",
        query.term(),
        filtered.len(),
        nodes.len()
    );
    Cow::Owned(filtered)
}

fn prune(node: &InfraNode, query: &SearchQuery, depth: usize) -> Option<InfraNode> {
    let children: Vec<InfraNode> = if depth + 1 >= MAX_DEPTH {
        tracing::warn!("Not filtering below {}: deeper than {} levels", node.id, MAX_DEPTH);
        Vec::new()
    } else {
        node.children
            .iter()
            .filter_map(|child| prune(child, query, depth + 1))
            .collect()
    };
    if children.is_empty() && !query.matches(&node.label) {
        return None;
    }
    Some(InfraNode {
        id: node.id.clone(),
        label: node.label.clone(),
        node_type: node.node_type,
        status: node.status,
        children,
        metadata: node.metadata.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infraview_core::Status;

    fn forest() -> Vec<InfraNode> {
        vec![
            InfraNode::environment(
                "us-east",
                "us-east-1.aws.com",
                vec![
                    InfraNode::server_pool(
                        "pool-1",
                        "API Gateway Pool",
                        vec![
                            InfraNode::workload("w1", "aws-api-gateway-1", Some(Status::Healthy)),
                            InfraNode::workload("w2", "aws-kong-gateway-1", Some(Status::Warning)),
                        ],
                    ),
                    InfraNode::server_pool(
                        "pool-2",
                        "Database Pool",
                        vec![InfraNode::workload("w3", "aws-redis-cache", Some(Status::Error))],
                    ),
                ],
            ),
            InfraNode::environment(
                "eu-west",
                "eu-west-1.aws.com",
                vec![InfraNode::server_pool(
                    "pool-3",
                    "Web Tier Pool",
                    vec![InfraNode::workload("w4", "aws-nginx-frontend-1", None)],
                )],
            ),
        ]
    }

    fn ids(nodes: &[InfraNode]) -> Vec<String> {
        Walk::new(nodes).map(|(_, n)| n.id.to_string()).collect()
    }

    #[test]
    fn test_blank_term_borrows_input() {
        let nodes = forest();
        let filtered = filter_tree_for_search(&nodes, "  ");
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered.as_ref(), nodes.as_slice());
    }

    #[test]
    fn test_ancestors_of_matches_are_kept() {
        let nodes = forest();
        let filtered = filter_tree_for_search(&nodes, "REDIS");
        assert_eq!(ids(&filtered), vec!["us-east", "pool-2", "w3"]);
    }

    #[test]
    fn test_matching_pool_keeps_only_matching_children() {
        let nodes = forest();
        let filtered = filter_tree_for_search(&nodes, "gateway");
        assert_eq!(ids(&filtered), vec!["us-east", "pool-1", "w1", "w2"]);

        let filtered = filter_tree_for_search(&nodes, "api");
        assert_eq!(ids(&filtered), vec!["us-east", "pool-1", "w1"]);
    }

    #[test]
    fn test_no_match_yields_empty_forest() {
        let nodes = forest();
        assert!(filter_tree_for_search(&nodes, "oracle").is_empty());
    }

    #[test]
    fn test_runaway_nesting_is_cut_at_depth_cap() {
        let mut node = InfraNode::workload("leaf", "match-me", None);
        for i in (0..MAX_DEPTH + 5).rev() {
            node = InfraNode::server_pool(format!("n{i}"), format!("n{i}"), vec![node]);
        }
        let filtered = filter_tree_for_search(std::slice::from_ref(&node), "n");
        assert_eq!(Walk::new(&filtered).count(), MAX_DEPTH);
    }

    #[test]
    fn test_is_included() {
        let nodes = forest();
        let query = SearchQuery::parse("nginx").unwrap();
        assert!(is_included(&nodes[1], Some(&query)));
        assert!(!is_included(&nodes[0], Some(&query)));
        assert!(is_included(&nodes[0], None));
    }
}
