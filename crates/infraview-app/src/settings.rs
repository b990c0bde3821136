use infraview_graph::{TierLayout, TopologyProjector};
use infraview_tree::{Pagination, Viewport};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Pagination threshold and initial number of children shown per pool.
    pub page_size: usize,
    pub load_more_step: usize,
    pub search_debounce_ms: u64,
    pub row_height: f32,
    pub overscan_rows: usize,
    #[serde(default = "default_true")]
    pub expanded_by_default: bool,
    #[serde(default)]
    pub layout: TierLayout,
}

fn default_true() -> bool {
    true
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            load_more_step: 20,
            search_debounce_ms: 300,
            row_height: 36.0,
            overscan_rows: 5,
            expanded_by_default: true,
            layout: TierLayout::default(),
        }
    }
}

impl ViewSettings {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page_size: self.page_size,
            step: self.load_more_step.max(1),
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.row_height, self.overscan_rows)
    }

    pub fn projector(&self) -> TopologyProjector {
        TopologyProjector::new(self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ViewSettings =
            serde_json::from_str(r#"{ "page_size": 25, "layout": { "pool_spacing": 200.0 } }"#)
                .unwrap();
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.load_more_step, 20);
        assert!(settings.expanded_by_default);
        assert_eq!(settings.layout.pool_spacing, 200.0);
        assert_eq!(settings.layout.pool_y, 200.0);
        assert_eq!(settings.debounce_window(), Duration::from_millis(300));
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let settings = ViewSettings {
            load_more_step: 0,
            ..ViewSettings::default()
        };
        assert_eq!(settings.pagination().step, 1);
    }
}
