//! Virtualization math for the row list. Rows have a fixed height agreed with
//! the renderer, so every window computation is O(1) in the row count except
//! the sticky-ancestor scan, which only walks back from the first visible row.

use crate::FlattenedRow;
use std::ops::Range;

/// Height of one tree row in pixels.
pub const ROW_HEIGHT: f32 = 36.0;

/// The slice of rows a renderer should materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
    /// First row actually inside the viewport (without overscan).
    pub first_visible: usize,
}

impl RowWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scroll_top: f32,
    row_height: f32,
    overscan: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ROW_HEIGHT, 5)
    }
}

impl Viewport {
    pub fn new(row_height: f32, overscan: usize) -> Self {
        Self {
            width: 0.0,
            height: 600.0,
            scroll_top: 0.0,
            row_height: row_height.max(1.0),
            overscan,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Record a container resize. Returns true when the rows-to-render count
    /// changed; repeating the same size is a no-op.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let before = self.rows_to_render();
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        before != self.rows_to_render()
    }

    /// Rows that fit in the viewport, plus overscan below it.
    pub fn rows_to_render(&self) -> usize {
        (self.height / self.row_height).ceil() as usize + self.overscan
    }

    pub fn scroll_to(&mut self, offset: f32, total_rows: usize) {
        let max = (total_rows as f32 * self.row_height - self.height).max(0.0);
        self.scroll_top = offset.clamp(0.0, max);
    }

    /// Scroll the minimum amount that makes row `index` fully visible.
    pub fn scroll_row_into_view(&mut self, index: usize, total_rows: usize) {
        let top = index as f32 * self.row_height;
        let bottom = top + self.row_height;
        if top < self.scroll_top {
            self.scroll_to(top, total_rows);
        } else if bottom > self.scroll_top + self.height {
            self.scroll_to(bottom - self.height, total_rows);
        }
    }

    pub fn window(&self, total_rows: usize) -> RowWindow {
        let first_visible = ((self.scroll_top / self.row_height).floor() as usize).min(total_rows);
        let start = first_visible.saturating_sub(self.overscan);
        let end = (first_visible + self.rows_to_render()).min(total_rows);
        RowWindow {
            start,
            end,
            first_visible,
        }
    }
}

/// Indices of the expanded ancestors of `rows[first_visible]`, outermost first.
/// Renderers pin these rows at the top while the list scrolls underneath.
pub fn sticky_ancestors(rows: &[FlattenedRow], first_visible: usize) -> Vec<usize> {
    let Some(row) = rows.get(first_visible) else {
        return Vec::new();
    };
    let mut ancestors = Vec::new();
    let mut level = row.level;
    for index in (0..first_visible).rev() {
        if level == 0 {
            break;
        }
        let candidate = &rows[index];
        if candidate.level < level {
            ancestors.push(index);
            level = candidate.level;
        }
    }
    ancestors.reverse();
    ancestors
}
