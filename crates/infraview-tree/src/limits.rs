use infraview_core::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pool pagination policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Pools with more children than this are paginated, and this many are
    /// shown before any "Load More".
    pub page_size: usize,
    /// How many more children each "Load More" reveals.
    pub step: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: 10,
            step: 20,
        }
    }
}

impl Pagination {
    pub fn paginates(&self, child_count: usize) -> bool {
        child_count > self.page_size
    }
}

/// How many children of a paginated pool are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayLimit {
    Bounded(usize),
    Unbounded,
}

impl DisplayLimit {
    /// Number of children emitted out of `total`.
    pub fn shown(self, total: usize) -> usize {
        match self {
            DisplayLimit::Bounded(n) => n.min(total),
            DisplayLimit::Unbounded => total,
        }
    }

    pub fn covers(self, total: usize) -> bool {
        self.shown(total) >= total
    }

    fn grown_by(self, step: usize) -> Self {
        match self {
            DisplayLimit::Bounded(n) => DisplayLimit::Bounded(n.saturating_add(step)),
            DisplayLimit::Unbounded => DisplayLimit::Unbounded,
        }
    }
}

/// Client-side display limits per pool. Never touches the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLimits {
    limits: HashMap<NodeId, DisplayLimit>,
}

impl DisplayLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pool_id: &str, pagination: &Pagination) -> DisplayLimit {
        self.limits
            .get(pool_id)
            .copied()
            .unwrap_or(DisplayLimit::Bounded(pagination.page_size))
    }

    /// Reveal `pagination.step` more children. Never shrinks the limit.
    pub fn load_more(&mut self, pool_id: &NodeId, pagination: &Pagination) -> DisplayLimit {
        let next = self.get(pool_id.as_str(), pagination).grown_by(pagination.step);
        self.limits.insert(pool_id.clone(), next);
        next
    }

    pub fn load_all(&mut self, pool_id: &NodeId) -> DisplayLimit {
        self.limits.insert(pool_id.clone(), DisplayLimit::Unbounded);
        DisplayLimit::Unbounded
    }

    /// Grow the limit in whole steps until the child at `index` is shown.
    /// Returns true if the limit changed.
    pub fn ensure_visible(
        &mut self,
        pool_id: &NodeId,
        index: usize,
        pagination: &Pagination,
    ) -> bool {
        let current = self.get(pool_id.as_str(), pagination);
        if current.shown(usize::MAX) > index {
            return false;
        }
        let needed = (index + 1).saturating_sub(pagination.page_size);
        let steps = needed.div_ceil(pagination.step.max(1));
        let limit = DisplayLimit::Bounded(pagination.page_size + steps * pagination.step.max(1));
        self.limits.insert(pool_id.clone(), limit);
        true
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
