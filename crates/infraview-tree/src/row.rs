use infraview_core::{NodeId, NodeType, Status};
use serde::{Deserialize, Serialize};

/// What a flattened row stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// A model node.
    Node,
    /// Sentinel: reveal the next page of `pool_id`'s children.
    LoadMore {
        pool_id: NodeId,
        total_count: usize,
        remaining: usize,
    },
    /// Sentinel: reveal every child of `pool_id`.
    LoadAll { pool_id: NodeId, total_count: usize },
}

/// One line of the virtualized tree.
///
/// Serializes to the flat renderer shape, where sentinels carry
/// `isLoadMore`/`isLoadAll` flags plus `poolId` and `totalCount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RowJson", try_from = "RowJson")]
pub struct FlattenedRow {
    pub id: NodeId,
    pub label: String,
    pub node_type: NodeType,
    pub status: Option<Status>,
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub kind: RowKind,
}

impl FlattenedRow {
    pub fn is_synthetic(&self) -> bool {
        !matches!(self.kind, RowKind::Node)
    }

    pub fn is_load_more(&self) -> bool {
        matches!(self.kind, RowKind::LoadMore { .. })
    }

    pub fn is_load_all(&self) -> bool {
        matches!(self.kind, RowKind::LoadAll { .. })
    }

    pub fn pool_id(&self) -> Option<&NodeId> {
        match &self.kind {
            RowKind::Node => None,
            RowKind::LoadMore { pool_id, .. } | RowKind::LoadAll { pool_id, .. } => Some(pool_id),
        }
    }

    pub fn total_count(&self) -> Option<usize> {
        match self.kind {
            RowKind::Node => None,
            RowKind::LoadMore { total_count, .. } | RowKind::LoadAll { total_count, .. } => {
                Some(total_count)
            }
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !flag
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowJson {
    id: NodeId,
    label: String,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
    level: usize,
    has_children: bool,
    is_expanded: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    is_load_more: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    is_load_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pool_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining: Option<usize>,
}

impl From<FlattenedRow> for RowJson {
    fn from(row: FlattenedRow) -> Self {
        let (is_load_more, is_load_all, pool_id, total_count, remaining) = match row.kind {
            RowKind::Node => (false, false, None, None, None),
            RowKind::LoadMore {
                pool_id,
                total_count,
                remaining,
            } => (true, false, Some(pool_id), Some(total_count), Some(remaining)),
            RowKind::LoadAll {
                pool_id,
                total_count,
            } => (false, true, Some(pool_id), Some(total_count), None),
        };
        Self {
            id: row.id,
            label: row.label,
            node_type: row.node_type,
            status: row.status,
            level: row.level,
            has_children: row.has_children,
            is_expanded: row.is_expanded,
            is_load_more,
            is_load_all,
            pool_id,
            total_count,
            remaining,
        }
    }
}

impl TryFrom<RowJson> for FlattenedRow {
    type Error = String;

    fn try_from(json: RowJson) -> Result<Self, Self::Error> {
        let kind = match (json.is_load_more, json.is_load_all) {
            (false, false) => RowKind::Node,
            (true, true) => {
                return Err(format!("row `{}` is both load-more and load-all", json.id));
            }
            (more, _) => {
                let (Some(pool_id), Some(total_count)) = (json.pool_id, json.total_count) else {
                    return Err(format!("sentinel row `{}` needs poolId and totalCount", json.id));
                };
                if more {
                    RowKind::LoadMore {
                        pool_id,
                        total_count,
                        remaining: json.remaining.unwrap_or(0),
                    }
                } else {
                    RowKind::LoadAll {
                        pool_id,
                        total_count,
                    }
                }
            }
        };
        Ok(Self {
            id: json.id,
            label: json.label,
            node_type: json.node_type,
            status: json.status,
            level: json.level,
            has_children: json.has_children,
            is_expanded: json.is_expanded,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_json_needs_pool() {
        let json = serde_json::json!({
            "id": "pool-load-all",
            "label": "Load All (12 total)",
            "type": "workload",
            "level": 2,
            "hasChildren": false,
            "isExpanded": false,
            "isLoadAll": true,
        });
        assert!(serde_json::from_value::<FlattenedRow>(json).is_err());
    }

    #[test]
    fn test_sentinel_json_is_read_back() {
        let json = serde_json::json!({
            "id": "pool-load-more",
            "label": "Load More (2 remaining)",
            "type": "workload",
            "level": 2,
            "hasChildren": false,
            "isExpanded": false,
            "isLoadMore": true,
            "poolId": "pool",
            "totalCount": 12,
            "remaining": 2,
        });
        let row: FlattenedRow = serde_json::from_value(json).unwrap();
        assert!(row.is_load_more());
        assert_eq!(row.pool_id().map(NodeId::as_str), Some("pool"));
        assert_eq!(row.total_count(), Some(12));
    }
}
