use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Fixed three-tier placement: root on top, pools evenly spaced below it, and
/// each pool's status groups centred under their pool.
///
/// Positions depend only on indices, so re-projecting the same environment
/// puts every node in the same spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierLayout {
    pub origin_x: f32,
    pub root_y: f32,
    pub pool_y: f32,
    pub server_y: f32,
    pub pool_spacing: f32,
    pub group_spacing: f32,
}

impl Default for TierLayout {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            root_y: 50.0,
            pool_y: 200.0,
            server_y: 350.0,
            pool_spacing: 300.0,
            group_spacing: 100.0,
        }
    }
}

impl TierLayout {
    /// Root sits above the middle of the pool row.
    pub fn root(&self, pool_count: usize) -> Vec2 {
        let span = pool_count.saturating_sub(1) as f32 * self.pool_spacing;
        Vec2::new(self.origin_x + span / 2.0, self.root_y)
    }

    pub fn pool(&self, pool_index: usize) -> Vec2 {
        Vec2::new(
            self.origin_x + pool_index as f32 * self.pool_spacing,
            self.pool_y,
        )
    }

    pub fn group(&self, pool: Vec2, group_index: usize, group_count: usize) -> Vec2 {
        let span = group_count.saturating_sub(1) as f32 * self.group_spacing;
        Vec2::new(
            pool.x - span / 2.0 + group_index as f32 * self.group_spacing,
            self.server_y,
        )
    }
}
