use crate::SketchOverlay;
use infraview_core::NodeId;
use infraview_graph::{Topology, TopologyId};
use infraview_tree::{FlattenedRow, RowWindow};

/// The slice of the tree a renderer should paint this frame.
#[derive(Debug, Clone)]
pub struct TreeFrame<'a> {
    /// Rows inside `window`, already sliced.
    pub rows: &'a [FlattenedRow],
    pub window: RowWindow,
    pub total_rows: usize,
    /// Container width in pixels.
    pub width: f32,
    pub row_height: f32,
    /// Absolute indices of rows to pin above the list.
    pub sticky: Vec<usize>,
    /// Absolute index of the selected row, if it is currently flattened.
    pub selected_row: Option<usize>,
    /// Raw search input, which may run ahead of the applied term.
    pub search_text: &'a str,
}

impl TreeFrame<'_> {
    pub fn is_selected(&self, absolute_index: usize) -> bool {
        self.selected_row == Some(absolute_index)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopologyFrame<'a> {
    pub topology: &'a Topology,
    pub highlighted: Option<&'a TopologyId>,
    pub sketch: &'a SketchOverlay,
}

/// Paints derived view state. Implemented once per drawing back-end.
pub trait Renderer {
    fn render_tree(&mut self, frame: &TreeFrame<'_>);

    fn render_topology(&mut self, frame: &TopologyFrame<'_>);

    /// Pan, zoom, and any other state kept for the previous projection must
    /// be dropped.
    fn reset_topology(&mut self, _env_id: Option<&NodeId>) {}
}
